//! Data models for fetched and grouped quotes.
//!
//! `QuoteCandidate` is the shape of a record as the API returns it, with
//! loosely-cased field names and possibly missing values. `Quote` is the
//! validated record that the rest of the application works with.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A validated quote with a non-blank author and text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quote {
    /// Who said it.
    pub author: String,
    /// What was said.
    pub quote: String,
}

impl Quote {
    pub fn new(author: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            quote: quote.into(),
        }
    }
}

/// Quotes keyed by author, ordered by author name.
pub type GroupedQuotes = BTreeMap<String, Vec<Quote>>;

/// A record as parsed from an API response, before validation.
///
/// Field names are matched case-insensitively (`author`, `Author`, `AUTHOR`
/// all work). Missing or `null` fields become `None`; any field that is not
/// a string or `null` fails deserialization. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuoteCandidate {
    pub author: Option<String>,
    pub quote: Option<String>,
}

impl QuoteCandidate {
    /// Returns true if both author and quote are present and non-blank.
    pub fn is_valid(&self) -> bool {
        is_present(&self.author) && is_present(&self.quote)
    }

    /// Convert into a `Quote`, or `None` if the candidate is invalid.
    pub fn into_quote(self) -> Option<Quote> {
        if !self.is_valid() {
            return None;
        }
        match (self.author, self.quote) {
            (Some(author), Some(quote)) => Some(Quote::new(author, quote)),
            _ => None,
        }
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl<'de> Deserialize<'de> for QuoteCandidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CandidateVisitor)
    }
}

struct CandidateVisitor;

impl<'de> Visitor<'de> for CandidateVisitor {
    type Value = QuoteCandidate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a quote object with `author` and `quote` fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut candidate = QuoteCandidate::default();

        // Later duplicates overwrite earlier ones.
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("author") {
                candidate.author = map.next_value()?;
            } else if key.eq_ignore_ascii_case("quote") {
                candidate.quote = map.next_value()?;
            } else {
                map.next_value::<de::IgnoredAny>()?;
            }
        }

        Ok(candidate)
    }
}
