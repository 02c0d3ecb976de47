//! Command-line interface argument parsing.
//!
//! Every flag is optional; running with no arguments fetches from the
//! default API and writes `GroupedQuotes.json`.

use clap::Parser;
use std::path::PathBuf;

/// QuoteGrouper - fetch quotes and group them by author
///
/// Calls a quote API a fixed number of times, drops records with a blank
/// author or quote, and writes the rest grouped by author as JSON.
///
/// Examples:
///   quotegrouper
///   quotegrouper --attempts 10 --output quotes.json
///   quotegrouper --url http://localhost:8080/quotes --verbose
///   quotegrouper --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Quote API endpoint
    #[arg(long, value_name = "URL", env = "QUOTEGROUPER_URL")]
    pub url: Option<String>,

    /// Number of requests to make
    #[arg(short, long, value_name = "COUNT")]
    pub attempts: Option<usize>,

    /// Output file path for the grouped quotes
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .quotegrouper.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Generate a default .quotegrouper.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Quote API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.attempts == Some(0) {
            return Err("Attempts must be at least 1".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether to draw the attempt progress bar.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            url: None,
            attempts: None,
            output: None,
            timeout: None,
            config: None,
            verbose: false,
            quiet: false,
            no_progress: false,
            init_config: false,
        }
    }

    #[test]
    fn test_no_arguments_is_valid() {
        let args = Args::parse_from(["quotegrouper"]);
        assert!(args.attempts.is_none());
        assert!(args.output.is_none());
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "quotegrouper",
            "--url",
            "http://localhost:8080/quotes",
            "-a",
            "3",
            "-o",
            "out.json",
            "--no-progress",
        ]);
        assert_eq!(args.url.as_deref(), Some("http://localhost:8080/quotes"));
        assert_eq!(args.attempts, Some(3));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(!args.show_progress());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.url = Some("api.example.com/quotes".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_attempts() {
        let mut args = make_args();
        args.attempts = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
        assert!(!args.show_progress());
    }
}
