//! Core data models and the reconciliation logic

mod board;
mod format;
mod quote;

pub use board::*;
pub use format::*;
pub use quote::*;
