//! cxxenv CLI - build-environment configuration for C++ projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use cxxenv::core::ConfigError;
use cxxenv::ops::VersionError;
use cxxenv::util::diagnostic::emit;
use cxxenv::GlobalContext;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "CXXENV_LOG";

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    // Set up logging
    let default_filter = if cli.verbose {
        "cxxenv=debug"
    } else {
        "cxxenv=info"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, color) {
        std::process::exit(report(&e, color));
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_color(color);

    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, &ctx),
        Commands::Flags(args) => commands::flags::execute(args, &ctx),
        Commands::Sources(args) => commands::sources::execute(args, &ctx),
        Commands::Version(args) => commands::version::execute(args, &ctx),
        Commands::Install(args) => commands::install::execute(args, &ctx),
        Commands::Toolchain(args) => commands::toolchain::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print the error and pick the exit status: 2 for usage errors, 1 otherwise.
fn report(err: &anyhow::Error, color: bool) -> i32 {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        emit(&config_err.to_diagnostic(), color);
        return 2;
    }

    if let Some(version_err) = err.downcast_ref::<VersionError>() {
        if matches!(version_err, VersionError::NoVersionInfo { .. }) {
            emit(&version_err.to_diagnostic(), color);
            return 1;
        }
    }

    eprintln!("error: {:#}", err);
    1
}
