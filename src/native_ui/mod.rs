//! Native egui-based UI for PriceBar
//!
//! Provides the overlay window: header, reorderable price rows, setup and
//! font panels.

mod app;
mod font_panel;
mod row_view;
mod setup;
mod theme;

pub use app::run;
