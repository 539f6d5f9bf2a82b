//! Quote model - a point-in-time snapshot of the spreadsheet's price rows

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single value cell from the quote range.
///
/// Numeric cells (and numeric-looking strings) become `Number`; anything else
/// non-blank is kept verbatim as `Text` and shown unformatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellField {
    Number(f64),
    Text(String),
    Empty,
}

/// One price row read from the spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub bid: CellField,
    pub ask: CellField,
    pub low: CellField,
    pub high: CellField,
}

/// All quotes read in a single poll, in spreadsheet order, with a
/// symbol lookup on the side.
#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    by_symbol: HashMap<String, usize>,
    read_at: DateTime<Utc>,
}

impl QuoteBook {
    pub fn new(quotes: Vec<Quote>) -> Self {
        let by_symbol = quotes
            .iter()
            .enumerate()
            .map(|(index, quote)| (quote.symbol.clone(), index))
            .collect();
        Self {
            quotes,
            by_symbol,
            read_at: Utc::now(),
        }
    }

    /// The book a failed poll degrades to: no quotes at all.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.by_symbol.get(symbol).map(|&index| &self.quotes[index])
    }

    /// Symbols in spreadsheet order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(|quote| quote.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn read_at(&self) -> DateTime<Utc> {
        self.read_at
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::empty()
    }
}
