// src/crawl/mod.rs
// =============================================================================
// This module mirrors a website subtree into a local directory.
//
// Submodules:
// - naming: URL -> file name / visited key
// - scope: which URLs belong to the mirror
// - destination: preparing the output directory and resuming from it
// - visited: the shared set of claimed URLs
// - fetch: downloading one page and saving it
// - links: finding the in-scope links on a saved page
// - crawler: the recursive, concurrent crawl that ties it all together
// - report: counters and the end-of-run summary
// - error: what can go wrong
// =============================================================================

mod crawler;
mod destination;
mod error;
mod fetch;
mod links;
mod naming;
mod report;
mod scope;
mod visited;

#[cfg(test)]
mod test_site;

// Re-export what main.rs needs
pub use crawler::{Crawler, MirrorConfig};
pub use destination::{load_visited, prepare};
pub use report::CrawlReport;
pub use scope::parse_start_url;
