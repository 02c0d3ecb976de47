//! Output generation.
//!
//! Serializes grouped quotes to JSON and writes them to disk.

pub mod writer;

pub use writer::*;
