use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use duim::cli::Cli;
use duim::commands::report::{self, ReportSettings};
use duim::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "duim", &mut io::stdout());
        return Ok(());
    }

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    let settings = ReportSettings::resolve(&cli, &config);
    tracing::info!(?settings, "Starting report");
    report::run(&settings)?;

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("duim={}", level)));

    // stdout carries only the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
