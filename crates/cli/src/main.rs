// cadence CLI entry point.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_code;
mod output;

use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "cadence", about = "Randomized weekday activity commits for a git repository")]
struct Cli {
    /// Defaults to `run` with no overrides.
    #[command(subcommand)]
    command: Option<commands::Command>,
}

fn main() -> process::ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let command = cli.command.unwrap_or_default();
    match commands::run(command) {
        Ok(()) => ExitCode::Success.into(),
        Err(error) => ExitCode::from_error(&error).into(),
    }
}

/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
