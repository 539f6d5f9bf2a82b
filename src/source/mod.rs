//! Quote source seam between the board and the spreadsheet

mod workbook;

pub use workbook::WorkbookSource;

use thiserror::Error;

use crate::core::QuoteBook;

/// Errors opening a source at startup. These are fatal: the main view is
/// never shown until a source opens cleanly.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet not found in {path}: {sheet}")]
    SheetNotFound { path: String, sheet: String },
}

/// Errors during a single poll. These are recovered by the caller: logged
/// and treated as an empty quote set for that tick.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to reopen workbook {path}: {source}")]
    Reopen {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet {sheet}: {source}")]
    Range {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// Something the board can poll quotes from.
///
/// The board never cares where quotes come from; tests drive it with a
/// scripted source.
pub trait QuoteSource {
    fn read(&mut self) -> Result<QuoteBook, ReadError>;
}
