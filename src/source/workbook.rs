//! Calamine-backed workbook source
//!
//! `open` validates path and sheet once at startup; `read` re-parses the
//! file on every poll so saves made by the spreadsheet application show up.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use super::{QuoteSource, ReadError, SourceError};
use crate::core::{CellField, Quote, QuoteBook};

/// Fixed input region B2:F500, zero-based (row, column) corners.
/// Columns map positionally to (symbol, bid, ask, low, high).
const RANGE_START: (u32, u32) = (1, 1);
const RANGE_END: (u32, u32) = (499, 5);

/// Symbol cells equal to one of these (after trimming, case-insensitive)
/// are skipped like blanks.
const EXCLUDED_SYMBOLS: &[&str] = &[""];

/// The single spreadsheet connection of the process: opened once at
/// startup, dropped exactly once at shutdown.
pub struct WorkbookSource {
    path: PathBuf,
    sheet: String,
}

impl WorkbookSource {
    /// Open and validate a workbook/sheet pair. Failure here is fatal for
    /// startup.
    pub fn open(path: &Path, sheet: &str) -> Result<Self, SourceError> {
        let workbook = open_workbook_auto(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;

        if !workbook.sheet_names().iter().any(|name| name.as_str() == sheet) {
            return Err(SourceError::SheetNotFound {
                path: path.display().to_string(),
                sheet: sheet.to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        })
    }

    /// Sheet names of an arbitrary workbook, for the setup dropdown.
    pub fn sheet_names(path: &Path) -> Result<Vec<String>, SourceError> {
        let workbook = open_workbook_auto(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(workbook.sheet_names())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }
}

impl QuoteSource for WorkbookSource {
    fn read(&mut self) -> Result<QuoteBook, ReadError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|source| ReadError::Reopen {
            path: self.path.display().to_string(),
            source,
        })?;

        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|source| ReadError::Range {
                sheet: self.sheet.clone(),
                source,
            })?;

        let quotes = range
            .range(RANGE_START, RANGE_END)
            .rows()
            .filter_map(quote_from_cells)
            .collect();

        Ok(QuoteBook::new(quotes))
    }
}

/// One candidate row of the quote range. `None` when the symbol cell is
/// blank or excluded.
fn quote_from_cells(cells: &[Data]) -> Option<Quote> {
    let symbol = cell_text(cells.first()?);
    let trimmed = symbol.trim();
    if trimmed.is_empty() || EXCLUDED_SYMBOLS.contains(&trimmed.to_uppercase().as_str()) {
        return None;
    }

    Some(Quote {
        symbol: trimmed.to_string(),
        bid: cell_field(cells.get(1)),
        ask: cell_field(cells.get(2)),
        low: cell_field(cells.get(3)),
        high: cell_field(cells.get(4)),
    })
}

/// Map a value cell to a field: numeric cells (and numeric-looking strings)
/// become numbers, blanks become empty, everything else stays raw text.
fn cell_field(cell: Option<&Data>) -> CellField {
    match cell {
        None | Some(Data::Empty) => CellField::Empty,
        Some(Data::Float(value)) => CellField::Number(*value),
        Some(Data::Int(value)) => CellField::Number(*value as f64),
        Some(Data::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                CellField::Empty
            } else if let Ok(value) = trimmed.parse::<f64>() {
                CellField::Number(value)
            } else {
                CellField::Text(text.clone())
            }
        }
        Some(other) => CellField::Text(cell_text(other)),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_or_excluded_symbols_are_skipped() {
        assert!(quote_from_cells(&[Data::Empty, Data::Float(1.0)]).is_none());
        assert!(quote_from_cells(&[Data::String("   ".to_string())]).is_none());
        assert!(quote_from_cells(&[]).is_none());
    }

    #[test]
    fn test_row_maps_columns_positionally() {
        let cells = [
            Data::String("EURUSD".to_string()),
            Data::Float(1.1),
            Data::Float(1.2),
            Data::Float(1.0),
            Data::Float(1.3),
        ];
        let quote = quote_from_cells(&cells).unwrap();
        assert_eq!(quote.symbol, "EURUSD");
        assert_eq!(quote.bid, CellField::Number(1.1));
        assert_eq!(quote.ask, CellField::Number(1.2));
        assert_eq!(quote.low, CellField::Number(1.0));
        assert_eq!(quote.high, CellField::Number(1.3));
    }

    #[test]
    fn test_short_rows_pad_with_empty_fields() {
        let quote = quote_from_cells(&[Data::String("EURUSD".to_string()), Data::Float(1.1)]).unwrap();
        assert_eq!(quote.bid, CellField::Number(1.1));
        assert_eq!(quote.ask, CellField::Empty);
        assert_eq!(quote.high, CellField::Empty);
    }

    #[test]
    fn test_value_cell_mapping() {
        assert_eq!(cell_field(Some(&Data::Float(1.5))), CellField::Number(1.5));
        assert_eq!(cell_field(Some(&Data::Int(7))), CellField::Number(7.0));
        assert_eq!(
            cell_field(Some(&Data::String("1.25".to_string()))),
            CellField::Number(1.25)
        );
        assert_eq!(
            cell_field(Some(&Data::String("#N/A".to_string()))),
            CellField::Text("#N/A".to_string())
        );
        assert_eq!(cell_field(Some(&Data::Empty)), CellField::Empty);
        assert_eq!(cell_field(None), CellField::Empty);
    }

    #[test]
    fn test_numeric_symbol_cells_stringify() {
        let quote = quote_from_cells(&[Data::Float(123.0), Data::Float(1.0)]).unwrap();
        assert_eq!(quote.symbol, "123");
    }
}
