// Hide console window on Windows release builds (the overlay is a GUI app,
// but the dump subcommand still wants a console in debug).
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! PriceBar - desktop overlay showing live price quotes from a spreadsheet
//!
//! - Polls a fixed workbook range and renders quotes as reorderable rows
//! - Persists window preferences and the symbol layout across runs
//! - CLI for a one-shot quote dump from the terminal (`pricebar dump`)

mod cli;
mod core;
mod logging;
mod native_ui;
mod settings;
mod source;

use std::time::Duration;

use clap::Parser;

use cli::{exit_codes, Cli, Commands};
use settings::Settings;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let interval = Duration::from_millis(cli.interval_ms.max(1));

    match cli.command {
        Some(Commands::Dump(args)) => match cli::dump::run(&args, &config_path) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                categorize_error(&e)
            }
        },
        None => match native_ui::run(config_path, interval) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                tracing::error!("overlay exited with error: {:#}", e);
                exit_codes::UNEXPECTED_FAILURE
            }
        },
    }
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    if e.chain().any(|cause| {
        cause.downcast_ref::<source::SourceError>().is_some()
            || cause.downcast_ref::<source::ReadError>().is_some()
    }) {
        return exit_codes::SOURCE_FAILURE;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("parse") || msg.contains("format") || msg.contains("invalid") {
        exit_codes::PARSE_ERROR
    } else {
        exit_codes::UNEXPECTED_FAILURE
    }
}
