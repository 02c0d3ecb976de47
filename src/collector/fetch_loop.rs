//! Fixed-count fetch loop.
//!
//! Every attempt fetches one response, parses it into candidates, splits
//! them into valid and invalid records, and appends the valid ones to the
//! running collection. An empty response is skipped; any fetch or parse
//! failure ends the whole run.

use crate::models::{Quote, QuoteCandidate};
use crate::source::{FetchError, QuoteSource};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

/// Default number of attempts per run.
pub const DEFAULT_ATTEMPTS: usize = 172;

/// Configuration for the collector.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// How many requests to make.
    pub attempts: usize,
    /// Draw a progress bar while fetching.
    pub show_progress: bool,
}

/// What a single attempt produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptReport {
    /// 1-based attempt number.
    pub attempt: usize,
    pub fetched: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl AttemptReport {
    fn empty(attempt: usize) -> Self {
        Self {
            attempt,
            fetched: 0,
            valid: 0,
            invalid: 0,
        }
    }
}

/// Totals across all attempts of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub attempts: usize,
    pub records_fetched: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Attempts whose response held no records.
    pub empty_responses: usize,
}

impl CollectionSummary {
    fn record(&mut self, report: &AttemptReport) {
        self.attempts += 1;
        self.records_fetched += report.fetched;
        self.valid += report.valid;
        self.invalid += report.invalid;
        if report.fetched == 0 {
            self.empty_responses += 1;
        }
    }
}

/// Valid quotes gathered by a run, in the order they were fetched.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub quotes: Vec<Quote>,
    pub summary: CollectionSummary,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Drives the fetch-validate-accumulate loop against a quote source.
pub struct QuoteCollector<S> {
    config: CollectorConfig,
    source: S,
}

impl<S: QuoteSource> QuoteCollector<S> {
    pub fn new(config: CollectorConfig, source: S) -> Self {
        info!(
            "Collector configured for {} attempts against {}",
            config.attempts,
            source.endpoint()
        );
        Self { config, source }
    }

    /// Run every attempt in order and return the accumulated quotes.
    ///
    /// Stops at the first `FetchError`; quotes gathered before the failure
    /// are dropped along with the collection.
    pub async fn run(&self) -> Result<Collection, FetchError> {
        let progress = self.progress_bar();
        let mut collection = Collection::default();

        progress.suspend(|| println!("Fetching records from API..."));

        for attempt in 1..=self.config.attempts {
            let report = match self.run_attempt(attempt, &mut collection.quotes, &progress).await {
                Ok(report) => report,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };

            debug!(
                "Attempt #{} done: {} fetched, {} valid, {} invalid",
                report.attempt, report.fetched, report.valid, report.invalid
            );
            collection.summary.record(&report);
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Collected {} valid quotes over {} attempts",
            collection.quotes.len(),
            collection.summary.attempts
        );

        Ok(collection)
    }

    async fn run_attempt(
        &self,
        attempt: usize,
        quotes: &mut Vec<Quote>,
        progress: &ProgressBar,
    ) -> Result<AttemptReport, FetchError> {
        progress.suspend(|| println!("Fetching records from API attempt #{}...", attempt));

        let body = self.source.fetch().await?;
        debug!("Attempt #{}: received {} bytes", attempt, body.len());

        progress.suspend(|| println!("Validating API response..."));
        let candidates = parse_candidates(&body)?;

        if candidates.is_empty() {
            progress.suspend(|| println!("No records found in the API response."));
            return Ok(AttemptReport::empty(attempt));
        }

        let fetched = candidates.len();
        progress.suspend(|| {
            println!(
                "Fetched {} records. Validating data structure...",
                fetched
            )
        });

        let (valid, invalid) = partition_candidates(candidates);
        progress.suspend(|| {
            println!(
                "Valid records: {}, Invalid records: {}",
                valid.len(),
                invalid.len()
            )
        });

        if !invalid.is_empty() {
            progress.suspend(|| {
                println!("Logging invalid records for review...");
                log_invalid_candidates(&invalid);
            });
        }

        let report = AttemptReport {
            attempt,
            fetched,
            valid: valid.len(),
            invalid: invalid.len(),
        };

        quotes.extend(valid);
        Ok(report)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.attempts as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} attempts")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// Parse a response body into quote candidates.
///
/// A JSON `null` body counts as an empty list. Anything that is not a list
/// of objects is an error.
pub fn parse_candidates(body: &str) -> Result<Vec<QuoteCandidate>, FetchError> {
    let parsed: Option<Vec<QuoteCandidate>> = serde_json::from_str(body)?;
    Ok(parsed.unwrap_or_default())
}

/// Split candidates into valid quotes and rejected candidates, keeping order.
pub fn partition_candidates(candidates: Vec<QuoteCandidate>) -> (Vec<Quote>, Vec<QuoteCandidate>) {
    let mut valid = Vec::with_capacity(candidates.len());
    let mut invalid = Vec::new();

    for candidate in candidates {
        if candidate.is_valid() {
            valid.extend(candidate.into_quote());
        } else {
            invalid.push(candidate);
        }
    }

    (valid, invalid)
}

fn log_invalid_candidates(invalid: &[QuoteCandidate]) {
    for candidate in invalid {
        match serde_json::to_string(candidate) {
            Ok(dump) => warn!("Invalid record: {}", dump),
            Err(_) => warn!("Invalid record: {:?}", candidate),
        }
    }
}
