use clap::Parser;
use emx_link::constants::{DEFAULT_LOG_FILTER, ENV_LOG};
use emx_link::{Cli, Command, Config};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Links { note } => cmd::links::run(&config, &note),
        Command::Follow { note, line, column } => cmd::follow::run(&note, line, column),
        Command::Copy { file, line } => cmd::copy::run(&config, &file, line),
        Command::Paste { note, line, yes, no_root } => {
            cmd::paste::run(&config, &note, line, yes, no_root)
        }
        Command::Root { file } => cmd::root::run(&config, &file),
    }
}

/// Logs go to stderr so stdout stays usable in pipelines
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

mod cmd {
    pub mod copy;
    pub mod follow;
    pub mod links;
    pub mod paste;
    pub mod root;
}
