//! Quote collection.
//!
//! This module runs the fixed-count fetch loop against a quote source and
//! accumulates the valid records it returns.

pub mod fetch_loop;

pub use fetch_loop::{Collection, CollectionSummary, CollectorConfig, QuoteCollector};
