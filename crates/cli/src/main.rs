//! Markup calculation from the command line.
//!
//! Run with: `markup <command>`. Logs go to stderr so `--format json` output
//! can be piped.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Calc, Inspect, Validate};
use config::CliConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Markup tactics for tender line items
#[derive(Parser)]
#[command(name = "markup")]
#[command(about = "Apply and check markup tactics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Price line items with a tactic and a parameter set
    Calc(Calc),

    /// Check a tactic's sequences, optionally against a parameter set
    Validate(Validate),

    /// Show a tactic's sequences and the parameters they read
    Inspect(Inspect),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    setup_logging(&config)?;

    let cli = Cli::parse();

    match cli.command {
        Command::Calc(cmd) => cmd.execute(&config),
        Command::Validate(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}

/// Setup logging to stderr, and to `markup.log` when a log directory is configured
fn setup_logging(config: &CliConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let file_layer = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::never(log_dir, "markup.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the whole process
            std::mem::forget(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(log_dir) = &config.log_dir {
        tracing::debug!("Log file: {}/markup.log", log_dir.display());
    }

    Ok(())
}
