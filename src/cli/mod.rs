//! Command-line surface for `docseq_cli`.

pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use docseq_config::StrategyKind;
use docseq_domain::{
    Category, DocumentDraft, DocumentKind, FiscalYearWindow, OverflowPolicy, TransactionEdit,
};
use uuid::Uuid;

use crate::{app::AppContext, errors::AppError, utils::build_info};

#[derive(Debug, Parser)]
#[command(
    name = "docseq_cli",
    version,
    about = "Sequential, fiscal-year scoped numbering for financial documents"
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory; defaults to `$DOCSEQ_HOME` or `~/.docseq`.
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fiscal year a date belongs to.
    FiscalYear { date: NaiveDate },
    /// Create a numbered document.
    Create {
        /// income, expense or invoice
        kind: DocumentKind,
        date: NaiveDate,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
    },
    /// Edit a transaction; changing the category assigns a new number.
    Edit {
        id: Uuid,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// List documents in creation order.
    List {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show one document.
    Show { id: Uuid },
    /// Print the effective configuration, optionally updating it first.
    Config {
        #[arg(long)]
        strategy: Option<StrategyKind>,
        #[arg(long)]
        max_attempts: Option<u32>,
        #[arg(long)]
        backoff_ms: Option<u64>,
        #[arg(long)]
        sequence_width: Option<usize>,
        #[arg(long)]
        overflow: Option<OverflowPolicy>,
    },
    /// Print build metadata.
    Info,
}

/// Executes a parsed command line.
pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::FiscalYear { date } => {
            fiscal_year(date);
            Ok(())
        }
        Command::Info => {
            build_details();
            Ok(())
        }
        Command::Config {
            strategy,
            max_attempts,
            backoff_ms,
            sequence_width,
            overflow,
        } => {
            let context = AppContext::open(cli.home)?;
            let mut config = context.config.clone();
            let mut changed = false;
            if let Some(strategy) = strategy {
                config.strategy = strategy;
                changed = true;
            }
            if let Some(max_attempts) = max_attempts {
                config.max_attempts = max_attempts;
                changed = true;
            }
            if let Some(backoff_ms) = backoff_ms {
                config.backoff_ms = backoff_ms;
                changed = true;
            }
            if let Some(width) = sequence_width {
                config.sequence_width = width;
                changed = true;
            }
            if let Some(overflow) = overflow {
                config.overflow = overflow;
                changed = true;
            }
            if changed {
                context.config_manager.save(&config)?;
                output::success("Configuration saved");
            }
            output::section("Configuration");
            output::info(format!("Strategy:       {}", config.strategy));
            output::info(format!("Max attempts:   {}", config.max_attempts));
            output::info(format!("Backoff (ms):   {}", config.backoff_ms));
            output::info(format!("Sequence width: {}", config.sequence_width));
            output::info(format!("Overflow:       {}", config.overflow));
            output::info(format!("Store file:     {}", context.store_path.display()));
            output::info(format!(
                "Config file:    {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        Command::Create {
            kind,
            date,
            description,
            amount,
        } => {
            let context = AppContext::open(cli.home)?;
            let draft = DocumentDraft::new(kind, date)
                .with_description(description)
                .with_amount(amount);
            let document = context.service.create(draft)?;
            output::success(format!("Created {}", document.document_number));
            output::document_details(&document);
            Ok(())
        }
        Command::Edit {
            id,
            category,
            date,
            description,
            amount,
        } => {
            let context = AppContext::open(cli.home)?;
            let before = context.service.get(id)?;
            let edit = TransactionEdit {
                category,
                date,
                description,
                amount,
            };
            if edit.is_empty() {
                output::warning("Nothing to change");
            }
            let after = context.service.update(id, edit)?;
            if after.document_number != before.document_number {
                output::success(format!(
                    "Renumbered {} -> {}",
                    before.document_number, after.document_number
                ));
            } else {
                output::success(format!("Updated {}", after.document_number));
            }
            output::document_details(&after);
            Ok(())
        }
        Command::List { category } => {
            let context = AppContext::open(cli.home)?;
            let documents = match category {
                Some(category) => context.service.list_category(category)?,
                None => context.service.list()?,
            };
            if documents.is_empty() {
                output::info("No documents recorded.");
            }
            for document in &documents {
                output::info(output::document_row(document));
            }
            Ok(())
        }
        Command::Show { id } => {
            let context = AppContext::open(cli.home)?;
            let document = context.service.get(id)?;
            output::document_details(&document);
            Ok(())
        }
    }
}

fn fiscal_year(date: NaiveDate) {
    match FiscalYearWindow::containing(date) {
        Some(window) => output::info(window),
        None => output::warning(format!("{date} is outside the supported calendar range")),
    }
}

fn build_details() {
    let meta = build_info::current();
    output::section("Build");
    output::info(format!("Version:   {}", meta.version));
    output::info(format!("Git hash:  {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("Built at:  {}", meta.timestamp));
    output::info(format!("Target:    {} [{}]", meta.target, meta.profile));
    output::info(format!("Rustc:     {}", meta.rustc));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_options() {
        let cli = Cli::try_parse_from([
            "docseq_cli",
            "-vv",
            "create",
            "expense",
            "2025-03-31",
            "--amount",
            "42.5",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Create { kind, date, amount, .. } => {
                assert_eq!(kind, DocumentKind::Transaction(Category::Expense));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
                assert_eq!(amount, 42.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["docseq_cli", "create", "refund", "2025-01-01"]).is_err());
    }
}
