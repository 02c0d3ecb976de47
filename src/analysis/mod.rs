//! Analysis modules.
//!
//! Grouping and statistics over the collected quotes.

pub mod aggregator;

pub use aggregator::*;
