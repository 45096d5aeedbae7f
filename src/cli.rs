// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   wget-mirror <START_URL> <DESTINATION> [--max-concurrency N] [--timeout-secs S] [--json]
//
// Both positional arguments are required; clap prints the usage and exits
// with a non-zero code when one is missing. The start URL is kept as a plain
// string here and validated by the crawl module, so its error message can
// say exactly what is wrong with it.
// =============================================================================

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wget-mirror",
    version = "0.1.0",
    about = "Mirror a website subtree into a local directory",
    long_about = "wget-mirror downloads the page at START_URL and every same-site page it links to \
                  whose path lies under START_URL's path. Each page is saved as one file in \
                  DESTINATION. Running it again on the same DESTINATION resumes: pages already \
                  saved are not downloaded again."
)]
pub struct Cli {
    /// URL to start mirroring from (e.g., https://example.com/docs/)
    pub start_url: String,

    /// Directory to save pages into; created if it does not exist
    pub destination: PathBuf,

    /// Maximum number of pages downloaded at the same time (default: unlimited)
    #[arg(long)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Give up on a single request after this many seconds (default: never)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the crawl summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals_are_required() {
        assert!(Cli::try_parse_from(["wget-mirror", "http://h/a"]).is_err());
        assert!(Cli::try_parse_from(["wget-mirror"]).is_err());
    }

    #[test]
    fn test_parses_all_options() {
        let cli = Cli::try_parse_from([
            "wget-mirror",
            "http://h/a",
            "out",
            "--max-concurrency",
            "8",
            "--timeout-secs",
            "30",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.start_url, "http://h/a");
        assert_eq!(cli.destination, PathBuf::from("out"));
        assert_eq!(cli.max_concurrency, NonZeroUsize::new(8));
        assert_eq!(cli.timeout_secs, Some(30));
        assert!(cli.json);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let args = ["wget-mirror", "http://h/a", "out", "--max-concurrency", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
