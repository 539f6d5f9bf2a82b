//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const SOURCE_FAILURE: i32 = 10;
    pub const PARSE_ERROR: i32 = 12;
    pub const UNEXPECTED_FAILURE: i32 = 70;
}

#[derive(Debug, Parser)]
#[command(
    name = "pricebar",
    version,
    about = "Desktop overlay showing live price quotes from a spreadsheet"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read the quote range once and print it
    Dump(DumpArgs),
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Workbook path (defaults to the configured FILE_PATH)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Sheet name (defaults to the configured SHEET_NAME)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub mod dump {
    use std::path::{Path, PathBuf};

    use anyhow::{bail, Context, Result};

    use super::DumpArgs;
    use crate::core::{format_field, QuoteBook};
    use crate::settings::Settings;
    use crate::source::{QuoteSource, WorkbookSource};

    /// One-shot read of the configured (or overridden) quote range.
    pub fn run(args: &DumpArgs, config_path: &Path) -> Result<()> {
        let (file, sheet) = resolve_target(args, config_path)?;

        let mut source = WorkbookSource::open(&file, &sheet)
            .with_context(|| format!("cannot open {} / {sheet}", file.display()))?;
        let book = source.read().context("quote read failed")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(book.quotes())?);
        } else if book.is_empty() {
            println!("(no quotes in range)");
        } else {
            print_table(&book);
        }
        Ok(())
    }

    fn resolve_target(args: &DumpArgs, config_path: &Path) -> Result<(PathBuf, String)> {
        let settings = Settings::load(config_path);

        let file = args
            .file
            .clone()
            .or_else(|| {
                settings
                    .as_ref()
                    .filter(|s| !s.file_path.is_empty())
                    .map(|s| PathBuf::from(&s.file_path))
            });
        let sheet = args
            .sheet
            .clone()
            .or_else(|| {
                settings
                    .as_ref()
                    .filter(|s| !s.sheet_name.is_empty())
                    .map(|s| s.sheet_name.clone())
            });

        match (file, sheet) {
            (Some(file), Some(sheet)) => Ok((file, sheet)),
            _ => bail!("no workbook configured; pass --file and --sheet or run the overlay once"),
        }
    }

    fn print_table(book: &QuoteBook) {
        const HEADERS: [&str; 5] = ["SYMBOL", "BID", "ASK", "LOW", "HIGH"];

        let rows: Vec<[String; 5]> = book
            .quotes()
            .iter()
            .map(|quote| {
                [
                    quote.symbol.clone(),
                    format_field(&quote.bid),
                    format_field(&quote.ask),
                    format_field(&quote.low),
                    format_field(&quote.high),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let print_row = |cells: [&str; 5]| {
            let line = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", line.trim_end());
        };

        print_row(HEADERS);
        for row in &rows {
            print_row([&row[0], &row[1], &row[2], &row[3], &row[4]]);
        }
    }
}
