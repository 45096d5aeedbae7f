// src/crawl/report.rs
// =============================================================================
// Counters kept while the crawl runs, and the report built from them.
//
// The counters are atomics so every task can bump them without locking.
// `CrawlReport` is a plain snapshot that serde can turn into JSON.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CrawlStats {
    resumed_entries: AtomicUsize,
    pages_written: AtomicUsize,
    pages_on_disk: AtomicUsize,
    duplicate_links: AtomicUsize,
    cancelled_links: AtomicUsize,
}

impl CrawlStats {
    pub fn new(resumed_entries: usize) -> Self {
        Self {
            resumed_entries: AtomicUsize::new(resumed_entries),
            ..Self::default()
        }
    }

    pub fn page_written(&self) {
        self.pages_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_on_disk(&self) {
        self.pages_on_disk.fetch_add(1, Ordering::Relaxed);
    }

    pub fn duplicate_link(&self) {
        self.duplicate_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cancelled_link(&self) {
        self.cancelled_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlReport {
        CrawlReport {
            resumed_entries: self.resumed_entries.load(Ordering::Relaxed),
            pages_written: self.pages_written.load(Ordering::Relaxed),
            pages_on_disk: self.pages_on_disk.load(Ordering::Relaxed),
            duplicate_links: self.duplicate_links.load(Ordering::Relaxed),
            cancelled_links: self.cancelled_links.load(Ordering::Relaxed),
        }
    }
}

// Summary of one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// Files found in the destination before the crawl started
    pub resumed_entries: usize,
    /// Pages downloaded and saved by this run
    pub pages_written: usize,
    /// Pages fetched but skipped because their file already existed
    pub pages_on_disk: usize,
    /// Links whose page had already been claimed
    pub duplicate_links: usize,
    /// Links not followed because the crawl was cancelled
    pub cancelled_links: usize,
}
