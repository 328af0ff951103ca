use report_gen::config::{load_config, CliArgs};
use report_gen::{parser, report};

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse command line arguments; clap exits with its own usage error
    let args = CliArgs::parse();

    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    // Load configuration
    let layout = load_config(args)?;

    if args.debug_config {
        println!("Layout:");
        println!("{:#?}", layout);
        return Ok(());
    }

    let records = parser::load_file(&args.data)?;
    debug!(records = records.len(), "formatting report");

    report::write_report(&records, &layout, &args.output)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so a report written to stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
