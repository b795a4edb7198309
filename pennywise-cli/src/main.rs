use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pennywise_core::Session;
use pennywise_ingest::{ingest, load_csv, sample_transactions, IngestReport};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chat;
mod config;
mod demo;
mod server;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PENNYWISE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "pennywise", version = VERSION, about = "Keyword-classified transactions, budgets and a budget chat bot")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Load transactions from a CSV (Date,Description,Amount[,Method])
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Start with an empty ledger instead of the built-in sample month
    #[arg(long, conflicts_with = "csv")]
    empty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sample month (or a CSV) through every stage and print the results
    Demo {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Ask a single question, e.g. `pennywise ask show budget status`
    Ask {
        #[command(flatten)]
        data: DataArgs,

        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Interactive terminal chat
    Chat {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Write processed_transactions.csv and budget_summary.csv
    Report {
        #[command(flatten)]
        data: DataArgs,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Serve the chat and dashboard API over HTTP
    Serve {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Manage ~/.pennywise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config (no-op if one exists)
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The chat UI owns the terminal, so its logs go to a file.
    let log_file = match cli.command {
        Command::Chat { .. } => Some(state::ensure_chat_dir()?.join("pennywise.log")),
        _ => None,
    };
    init_tracing(cli.verbose, log_file.as_deref())?;

    match cli.command {
        Command::Demo { data } => {
            let (mut session, report) = load_session(&data)?;
            demo::run_demo(&mut session, report);
        }

        Command::Ask { data, text } => {
            let (mut session, _) = load_session(&data)?;
            println!("{}", session.respond(&text.join(" ")));
        }

        Command::Chat { data } => {
            let (mut session, _) = load_session(&data)?;
            chat::run_chat(&mut session)?;
        }

        Command::Report { data, out } => {
            let (session, _) = load_session(&data)?;
            let paths = pennywise_finance::write_reports(&session, &out)?;
            println!("Reports saved:");
            println!("  {}", paths.transactions.display());
            println!("  {}", paths.budget.display());
        }

        Command::Serve { data, host, port } => {
            let (session, _) = load_session(&data)?;
            server::serve(session, &host, port).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

/// Priority: RUST_LOG env var > --verbose flag > default (info)
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .compact()
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

/// Build a session from config and fill it from the requested source.
fn load_session(data: &DataArgs) -> Result<(Session, IngestReport)> {
    let cfg = config::load_config()?;
    let mut session = cfg.build_session()?;

    let rows = match (&data.csv, data.empty) {
        (Some(path), _) => {
            load_csv(path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, true) => Vec::new(),
        (None, false) => sample_transactions(),
    };

    let report = ingest(&mut session, rows);
    info!(transactions = session.ledger().len(), "session ready");
    Ok((session, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["pennywise", "-v", "ask", "--empty", "add", "500", "pizza"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Ask { data, text } => {
                assert!(data.empty);
                assert_eq!(text.join(" "), "add 500 pizza");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_csv_conflicts_with_empty() {
        assert!(Cli::try_parse_from(["pennywise", "demo", "--csv", "x.csv", "--empty"]).is_err());
    }
}
