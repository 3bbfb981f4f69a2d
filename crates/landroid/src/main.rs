mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr so rendered output stays pipeable. `RUST_LOG`
/// wins over `-v`/`-q`.
fn init_tracing(global: &GlobalOpts) {
    let level = match (global.quiet, global.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;

    // Completions need neither a snapshot nor a config file.
    if let Command::Completions(args) = &command {
        clap_complete::generate(args.shell, &mut Cli::command(), "landroid", &mut std::io::stdout());
        return Ok(());
    }

    tracing::debug!(
        snapshot = ?global.snapshot,
        config = %config::config_path(&global).display(),
        "rendering"
    );
    commands::dispatch(command, &global)
}
