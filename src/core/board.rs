//! Row state and the poll-tick reconciliation logic
//!
//! The board owns the ordered row list. The first poll fills rows in
//! spreadsheet order; every later poll only refreshes values for rows the
//! user has bound to a symbol - binding and ordering stay under user control.

use super::format::{format_field, format_price};
use super::quote::{CellField, Quote, QuoteBook};

/// Number of rows the board starts with; the list can grow, never shrink.
pub const INITIAL_ROWS: usize = 12;

/// Direction of the last change of a displayed price.
///
/// An unchanged value keeps the previous flash - there is no reset to
/// `Steady` on equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flash {
    #[default]
    Steady,
    Up,
    Down,
}

/// One display slot, bound to at most one symbol at a time.
///
/// `last_bid`/`last_ask` exist only to drive the flash comparison and are
/// overwritten on every successful numeric parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub symbol: String,
    pub bid_text: String,
    pub ask_text: String,
    pub low_text: String,
    pub high_text: String,
    pub last_bid: f64,
    pub last_ask: f64,
    pub bid_flash: Flash,
    pub ask_flash: Flash,
}

impl Row {
    pub fn is_bound(&self) -> bool {
        !self.symbol.trim().is_empty()
    }

    /// Unbind the row. The row itself stays in the list; last known numeric
    /// values are kept so a re-bound symbol compares against them.
    fn clear(&mut self) {
        self.symbol.clear();
        self.bid_text.clear();
        self.ask_text.clear();
        self.low_text.clear();
        self.high_text.clear();
        self.bid_flash = Flash::Steady;
        self.ask_flash = Flash::Steady;
    }

    /// Push fresh quote values into the row, updating flash state.
    fn push_quote(&mut self, quote: &Quote) {
        match &quote.bid {
            CellField::Number(value) => {
                if *value > self.last_bid {
                    self.bid_flash = Flash::Up;
                } else if *value < self.last_bid {
                    self.bid_flash = Flash::Down;
                }
                self.bid_text = format_price(*value);
                self.last_bid = *value;
            }
            CellField::Text(text) => self.bid_text = text.clone(),
            CellField::Empty => self.bid_text.clear(),
        }

        match &quote.ask {
            CellField::Number(value) => {
                if *value > self.last_ask {
                    self.ask_flash = Flash::Up;
                } else if *value < self.last_ask {
                    self.ask_flash = Flash::Down;
                }
                self.ask_text = format_price(*value);
                self.last_ask = *value;
            }
            CellField::Text(text) => self.ask_text = text.clone(),
            CellField::Empty => self.ask_text.clear(),
        }

        self.low_text = format_field(&quote.low);
        self.high_text = format_field(&quote.high);
    }
}

/// The ordered row list plus the latest quote snapshot.
#[derive(Debug, Default)]
pub struct Board {
    rows: Vec<Row>,
    book: QuoteBook,
    first_fill_done: bool,
}

impl Board {
    pub fn new(row_count: usize) -> Self {
        Self {
            rows: vec![Row::default(); row_count],
            book: QuoteBook::empty(),
            first_fill_done: false,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn book(&self) -> &QuoteBook {
        &self.book
    }

    /// One poll tick. The very first tick assigns quotes to rows
    /// positionally in read order and clears rows beyond the available
    /// quotes; that assignment never repeats, even when the first read came
    /// back empty. Later ticks only refresh values of bound rows whose
    /// symbol is present in the book.
    pub fn tick(&mut self, book: QuoteBook) {
        self.book = book;

        if !self.first_fill_done {
            for (index, row) in self.rows.iter_mut().enumerate() {
                match self.book.quotes().get(index) {
                    Some(quote) => {
                        row.symbol = quote.symbol.clone();
                        row.push_quote(quote);
                    }
                    None => row.clear(),
                }
            }
            self.first_fill_done = true;
        } else {
            for row in &mut self.rows {
                if !row.is_bound() {
                    continue;
                }
                if let Some(quote) = self.book.get(row.symbol.trim()) {
                    row.push_quote(quote);
                }
            }
        }

        self.ensure_add_row();
    }

    /// Apply a saved row layout at startup. Symbols are written
    /// positionally (growing the list if the saved layout is longer) and
    /// first-fill is marked complete so the next tick refreshes values
    /// instead of refilling.
    pub fn restore_layout(&mut self, symbols: &[String]) {
        if symbols.is_empty() {
            return;
        }
        while self.rows.len() < symbols.len() {
            self.rows.push(Row::default());
        }
        for (row, symbol) in self.rows.iter_mut().zip(symbols) {
            row.symbol = symbol.trim().to_string();
        }
        self.first_fill_done = true;
    }

    /// Stable partition: bound rows first, then unbound rows, each group in
    /// its current relative order.
    pub fn reorder(&mut self) {
        let mut bound = Vec::with_capacity(self.rows.len());
        let mut unbound = Vec::new();
        for row in self.rows.drain(..) {
            if row.is_bound() {
                bound.push(row);
            } else {
                unbound.push(row);
            }
        }
        bound.extend(unbound);
        self.rows = bound;
    }

    /// Swap a row with its immediate neighbor. Returns the swapped index
    /// pair as a reorder event for the presentation layer, or `None` when
    /// the neighbor does not exist.
    pub fn move_row(&mut self, index: usize, delta: isize) -> Option<(usize, usize)> {
        if index >= self.rows.len() {
            return None;
        }
        let target = index.checked_add_signed(delta)?;
        if target >= self.rows.len() {
            return None;
        }
        self.rows.swap(index, target);
        Some((index, target))
    }

    /// Unbind a row in place, then restore the bound-before-unbound order.
    pub fn clear_row(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.clear();
        }
        self.reorder();
        self.ensure_add_row();
    }

    /// Bind a symbol to a row and push its current values if known.
    pub fn assign_symbol(&mut self, index: usize, symbol: &str) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        row.symbol = symbol.trim().to_string();
        if let Some(quote) = self.book.get(row.symbol.as_str()) {
            row.push_quote(quote);
        }
        self.reorder();
        self.ensure_add_row();
    }

    /// Keep exactly one trailing empty row available while undisplayed
    /// spreadsheet symbols remain. Rows are never deleted.
    pub fn ensure_add_row(&mut self) {
        let has_empty = self.rows.iter().any(|row| !row.is_bound());
        if !has_empty && self.available_symbols().next().is_some() {
            self.rows.push(Row::default());
        }
    }

    /// The single row eligible for the add affordance: the first unbound
    /// row in display order, and only while unused symbols remain.
    pub fn add_slot(&self) -> Option<usize> {
        self.available_symbols().next()?;
        self.rows.iter().position(|row| !row.is_bound())
    }

    /// Spreadsheet symbols not currently displayed by any row, in
    /// spreadsheet order.
    pub fn available_symbols(&self) -> impl Iterator<Item = &str> {
        self.book
            .symbols()
            .filter(|symbol| !self.rows.iter().any(|row| row.symbol.trim() == *symbol))
    }

    /// Available symbols matching a case-insensitive substring filter.
    pub fn matching_symbols(&self, filter: &str) -> Vec<String> {
        let needle = filter.trim().to_uppercase();
        self.available_symbols()
            .filter(|symbol| symbol.to_uppercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }

    /// Current symbol layout, one entry per row, empty slots as empty
    /// strings. This is what gets persisted as `ROWS`.
    pub fn row_symbols(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.symbol.trim().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, bid: f64, ask: f64, low: f64, high: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            bid: CellField::Number(bid),
            ask: CellField::Number(ask),
            low: CellField::Number(low),
            high: CellField::Number(high),
        }
    }

    fn book(quotes: &[Quote]) -> QuoteBook {
        QuoteBook::new(quotes.to_vec())
    }

    fn bound_symbols(board: &Board) -> Vec<String> {
        board
            .rows()
            .iter()
            .filter(|row| row.is_bound())
            .map(|row| row.symbol.clone())
            .collect()
    }

    #[test]
    fn test_first_tick_fills_positionally() {
        let mut board = Board::new(INITIAL_ROWS);
        board.tick(book(&[quote("EURUSD", 1.1, 1.2, 1.0, 1.3)]));

        let rows = board.rows();
        assert_eq!(rows[0].symbol, "EURUSD");
        assert_eq!(rows[0].bid_text, "1.100000");
        assert_eq!(rows[0].ask_text, "1.200000");
        assert_eq!(rows[0].low_text, "1.000000");
        assert_eq!(rows[0].high_text, "1.300000");
        assert!(rows[1..].iter().all(|row| !row.is_bound()));
    }

    #[test]
    fn test_first_fill_never_repeats() {
        let mut board = Board::new(4);
        board.tick(QuoteBook::empty());

        // Quotes appearing later must not trigger a positional refill.
        board.tick(book(&[quote("EURUSD", 1.1, 1.2, 1.0, 1.3)]));
        assert!(board.rows().iter().all(|row| !row.is_bound()));
    }

    #[test]
    fn test_tick_is_idempotent() {
        let mut board = Board::new(4);
        let data = [quote("EURUSD", 1.1, 1.2, 1.0, 1.3), quote("GBPUSD", 1.4, 1.5, 1.3, 1.6)];
        board.tick(book(&data));
        let after_first: Vec<Row> = board.rows().to_vec();

        board.tick(book(&data));
        assert_eq!(board.rows(), &after_first[..]);
    }

    #[test]
    fn test_flash_tracks_direction() {
        let mut board = Board::new(2);
        board.tick(book(&[quote("EURUSD", 1.2, 1.2, 1.0, 1.3)]));

        board.tick(book(&[quote("EURUSD", 1.25, 1.1, 1.0, 1.3)]));
        assert_eq!(board.rows()[0].bid_flash, Flash::Up);
        assert_eq!(board.rows()[0].ask_flash, Flash::Down);
        assert_eq!(board.rows()[0].bid_text, "1.250000");

        // Equal values keep the previous flash rather than resetting it.
        board.tick(book(&[quote("EURUSD", 1.25, 1.1, 1.0, 1.3)]));
        assert_eq!(board.rows()[0].bid_flash, Flash::Up);
        assert_eq!(board.rows()[0].ask_flash, Flash::Down);
    }

    #[test]
    fn test_text_cell_shown_raw_without_touching_flash() {
        let mut board = Board::new(2);
        board.tick(book(&[quote("EURUSD", 1.2, 1.2, 1.0, 1.3)]));

        let mut broken = quote("EURUSD", 1.2, 1.2, 1.0, 1.3);
        broken.bid = CellField::Text("#N/A".to_string());
        board.tick(book(&[broken]));

        assert_eq!(board.rows()[0].bid_text, "#N/A");
        assert_eq!(board.rows()[0].last_bid, 1.2);
    }

    #[test]
    fn test_manual_symbol_change_survives_ticks() {
        let mut board = Board::new(4);
        let data = [quote("EURUSD", 1.1, 1.2, 1.0, 1.3), quote("GBPUSD", 1.4, 1.5, 1.3, 1.6)];
        board.tick(book(&data));

        board.clear_row(0);
        board.assign_symbol(0, "GBPUSD");

        // Spreadsheet order says EURUSD first; the user's choice wins.
        board.tick(book(&data));
        assert_eq!(board.rows()[0].symbol, "GBPUSD");
        assert_eq!(board.rows()[0].bid_text, "1.400000");
    }

    #[test]
    fn test_reorder_partitions_and_preserves_relative_order() {
        let mut board = Board::new(5);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
            quote("C", 1.0, 1.0, 1.0, 1.0),
        ]));

        board.clear_row(1); // clears B, reorders

        assert_eq!(bound_symbols(&board), vec!["A", "C"]);
        let first_unbound = board.rows().iter().position(|row| !row.is_bound()).unwrap();
        assert!(board.rows()[first_unbound..].iter().all(|row| !row.is_bound()));
    }

    #[test]
    fn test_move_row_swaps_neighbors_only() {
        let mut board = Board::new(3);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
            quote("C", 1.0, 1.0, 1.0, 1.0),
        ]));

        assert_eq!(board.move_row(0, -1), None);
        assert_eq!(board.move_row(1, 1), Some((1, 2)));
        assert_eq!(bound_symbols(&board), vec!["A", "C", "B"]);
        assert_eq!(board.move_row(99, 1), None);
    }

    #[test]
    fn test_add_slot_requires_unused_symbols() {
        let mut board = Board::new(2);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
        ]));

        // Every symbol displayed and every row bound: no add slot, and no
        // extra row gets created.
        assert_eq!(board.add_slot(), None);
        assert_eq!(board.rows().len(), 2);

        // Clearing a row frees a symbol; the first (only) empty row becomes
        // the add slot.
        board.clear_row(1);
        assert_eq!(board.add_slot(), Some(1));
        assert_eq!(board.available_symbols().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_ensure_add_row_appends_exactly_one() {
        let mut board = Board::new(1);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
        ]));

        // One row, bound to A; B remains unused, so a single empty row is
        // appended and repeated ticks do not add more.
        assert_eq!(board.rows().len(), 2);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
        ]));
        assert_eq!(board.rows().len(), 2);
        assert_eq!(board.add_slot(), Some(1));
    }

    #[test]
    fn test_only_first_empty_row_is_the_add_slot() {
        let mut board = Board::new(4);
        board.tick(book(&[
            quote("A", 1.0, 1.0, 1.0, 1.0),
            quote("B", 1.0, 1.0, 1.0, 1.0),
        ]));

        // Rows 2 and 3 are both empty; only the first of them may offer add.
        assert_eq!(board.add_slot(), Some(2));
    }

    #[test]
    fn test_matching_symbols_filters_case_insensitively() {
        let mut board = Board::new(1);
        board.tick(book(&[
            quote("EURUSD", 1.0, 1.0, 1.0, 1.0),
            quote("USDJPY", 1.0, 1.0, 1.0, 1.0),
            quote("GBPUSD", 1.0, 1.0, 1.0, 1.0),
        ]));

        // Row 0 took EURUSD; the filter searches the rest.
        assert_eq!(board.matching_symbols("usd"), vec!["USDJPY", "GBPUSD"]);
        assert_eq!(board.matching_symbols("jpy"), vec!["USDJPY"]);
        assert!(board.matching_symbols("xau").is_empty());
    }

    #[test]
    fn test_restore_layout_overrides_first_fill() {
        let mut board = Board::new(2);
        board.restore_layout(&["GBPUSD".to_string(), String::new(), "USDJPY".to_string()]);

        assert_eq!(board.rows().len(), 3);

        // A restored layout is authoritative: the tick refreshes values but
        // never refills positionally from spreadsheet order.
        board.tick(book(&[
            quote("EURUSD", 1.1, 1.2, 1.0, 1.3),
            quote("GBPUSD", 1.4, 1.5, 1.3, 1.6),
        ]));
        assert_eq!(board.rows()[0].symbol, "GBPUSD");
        assert_eq!(board.rows()[0].bid_text, "1.400000");
        assert_eq!(board.rows()[2].symbol, "USDJPY");
        assert_eq!(board.rows()[2].bid_text, "");
    }

    #[test]
    fn test_row_symbols_round_trip_layout() {
        let mut board = Board::new(3);
        board.tick(book(&[quote("A", 1.0, 1.0, 1.0, 1.0)]));
        assert_eq!(board.row_symbols(), vec!["A", "", ""]);
    }

    #[test]
    fn test_end_to_end_single_quote() {
        let mut board = Board::new(INITIAL_ROWS);
        board.tick(book(&[quote("EURUSD", 1.1, 1.2, 1.0, 1.3)]));

        assert_eq!(board.rows()[0].symbol, "EURUSD");
        assert_eq!(board.rows()[0].ask_text, "1.200000");
        assert!(board.rows()[1..].iter().all(|row| !row.is_bound()));

        board.tick(book(&[quote("EURUSD", 1.25, 1.2, 1.0, 1.3)]));
        assert_eq!(board.rows()[0].bid_flash, Flash::Up);
        assert_eq!(board.rows()[0].bid_text, "1.250000");
    }
}
