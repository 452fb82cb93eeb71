use clap::{Parser, Subcommand};
use reel_core::logging::{LogFormat, init_subscriber};
use tracing::debug;

use crate::console::{ConsoleArgs, run_console};
use crate::error::Result;
use crate::simulate::{SimulateArgs, run_simulate};

#[derive(Debug, Parser)]
#[command(
    name = "reel-harness",
    about = "Drive the Reel carousel engine without a renderer",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log filter (`RUST_LOG` syntax); `RUST_LOG` wins when set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read carousel commands line by line (stdin or --script).
    Console(ConsoleArgs),

    /// Fling the carousel and print one line per frame.
    Simulate(SimulateArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    install_logging(&cli);
    run(cli)
}

/// Install the stderr subscriber. Returns `false` when one was already
/// installed (for example by an embedding process), which is kept.
pub fn install_logging(cli: &Cli) -> bool {
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    match init_subscriber(&cli.log_filter, format) {
        Ok(()) => true,
        Err(error) => {
            debug!(%error, "keeping existing tracing subscriber");
            false
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Console(args) => run_console(args),
        Commands::Simulate(args) => run_simulate(args),
    }
}
