// src/main.rs
// =============================================================================
// This is the entry point of wget-mirror.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the start URL, then prepare the destination directory
// 3. Load the files already in the destination as the visited set
// 4. Run the crawl and print a summary
// 5. Exit with 0 on success, 1 on any error (clap itself uses 2)
//
// Validation happens in that order so a bad argument writes nothing.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the mirror itself

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::{CrawlReport, Crawler, MirrorConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wget_mirror=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let start = crawl::parse_start_url(&cli.start_url)?;
    crawl::prepare(&cli.destination)?;
    let visited = crawl::load_visited(&cli.destination)?;

    let mut config = MirrorConfig::new(start, &cli.destination);
    config.max_concurrency = cli.max_concurrency;
    config.request_timeout = cli.timeout_secs.map(Duration::from_secs);

    let crawler = Arc::new(Crawler::new(&config, visited)?);
    let report = crawler.mirror().await?;

    print_report(&report, cli.json)
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("📊 Summary:");
        println!("   📥 Saved: {}", report.pages_written);
        println!("   💾 Already on disk: {}", report.pages_on_disk);
        println!("   🔁 Duplicate links: {}", report.duplicate_links);
        println!("   ⏭️  Resumed entries: {}", report.resumed_entries);
        if report.cancelled_links > 0 {
            println!("   🛑 Skipped after interrupt: {}", report.cancelled_links);
        }
    }
    Ok(())
}
