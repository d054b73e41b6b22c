pub mod build_info;
pub mod paths;

use tracing_subscriber::{fmt, EnvFilter};

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "docseq",
    "docseq_config",
    "docseq_core",
    "docseq_domain",
    "docseq_storage_json",
];

/// Installs the global subscriber, writing to stderr.
///
/// Verbosity 0 logs warnings, 1 info, 2 debug, 3+ trace. `RUST_LOG` overrides it.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber installed by a host application wins.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
