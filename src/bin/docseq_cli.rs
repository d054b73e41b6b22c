use clap::Parser;
use docseq::cli::{self, output, Cli};

fn main() {
    let cli = Cli::parse();
    docseq::init(cli.verbose);

    if let Err(err) = cli::run(cli) {
        output::error(&err);
        std::process::exit(1);
    }
}
