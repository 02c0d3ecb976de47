//! Quote grouping and statistics.
//!
//! This module groups collected quotes by author and computes the small
//! statistics shown in the run summary.

use crate::models::{GroupedQuotes, Quote};

/// Group quotes by author.
///
/// Authors are compared exactly (case-sensitive) and come out in ascending
/// order. Quotes within an author keep the order they were collected in.
pub fn group_by_author(quotes: &[Quote]) -> GroupedQuotes {
    let mut grouped = GroupedQuotes::new();

    for quote in quotes {
        grouped
            .entry(quote.author.clone())
            .or_default()
            .push(quote.clone());
    }

    grouped
}

/// Identify the authors with the most quotes.
///
/// Ties keep alphabetical order.
pub fn most_quoted_authors(grouped: &GroupedQuotes, n: usize) -> Vec<(&str, usize)> {
    let mut authors: Vec<_> = grouped
        .iter()
        .map(|(author, quotes)| (author.as_str(), quotes.len()))
        .collect();

    authors.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    authors.truncate(n);

    authors
}

/// Total number of quotes across all groups.
pub fn total_quotes(grouped: &GroupedQuotes) -> usize {
    grouped.values().map(Vec::len).sum()
}
