// src/crawl/crawler.rs
// =============================================================================
// This module implements the recursive mirror.
//
// How one download works:
// 1. Normalize the URL and claim it in the visited registry; if someone
//    already claimed it, we are done
// 2. Fetch the page and save it (or notice it is already on disk and stop)
// 3. Extract the in-scope child links from the saved body
// 4. Spawn one task per child link; each task first checks for
//    cancellation, then downloads its child the same way
// 5. Wait for every child task and report their failures
//
// There is no queue: the tree of tasks is the crawl frontier. Each task
// owns the join set of its direct children.
//
// Cancellation is cooperative. Ctrl-C or SIGTERM cancels a token; tasks
// look at it only when they start, so fetches already in flight finish.
//
// Rust concepts:
// - self: Arc<Self>: each spawned task owns a handle to the same crawler
// - BoxFuture: an async fn cannot call itself directly (its future would
//   have infinite size), so the recursive step returns a boxed future
// - JoinSet: a group of spawned tasks we can wait on one by one
// - CancellationToken: a cheap, clonable flag shared by the whole task tree
// =============================================================================

use super::error::MirrorError;
use super::fetch::{FetchOutcome, PageWriter};
use super::links::child_links;
use super::naming::normalize;
use super::report::{CrawlReport, CrawlStats};
use super::scope::Scope;
use super::visited::VisitedRegistry;
use futures::future::{BoxFuture, FutureExt};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

// Everything a crawl needs to know up front
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub start: Url,
    pub destination: PathBuf,
    /// Upper bound on simultaneous fetches; `None` means unbounded
    pub max_concurrency: Option<NonZeroUsize>,
    /// Per-request timeout; `None` means wait forever
    pub request_timeout: Option<Duration>,
}

impl MirrorConfig {
    pub fn new(start: Url, destination: impl Into<PathBuf>) -> Self {
        Self {
            start,
            destination: destination.into(),
            max_concurrency: None,
            request_timeout: None,
        }
    }
}

pub struct Crawler {
    scope: Scope,
    visited: VisitedRegistry,
    writer: PageWriter,
    fetch_permits: Option<Semaphore>,
    stats: CrawlStats,
}

impl Crawler {
    // Builds a crawler over an already prepared destination
    //
    // `visited` is normally the registry returned by the resume loader.
    pub fn new(config: &MirrorConfig, visited: VisitedRegistry) -> Result<Self, MirrorError> {
        let writer = PageWriter::new(&config.destination, config.request_timeout)?;
        let stats = CrawlStats::new(visited.len());

        Ok(Self {
            scope: Scope::new(config.start.clone()),
            visited,
            writer,
            fetch_permits: config.max_concurrency.map(|n| Semaphore::new(n.get())),
            stats,
        })
    }

    // Mirrors the site, cancelling on Ctrl-C or SIGTERM
    //
    // Returns: the crawl report, or the error(s) of the branches that failed.
    // A failing branch never stops its siblings.
    pub async fn mirror(self: Arc<Self>) -> Result<CrawlReport, MirrorError> {
        let token = CancellationToken::new();
        let watcher = tokio::spawn(cancel_on_signal(token.clone()));

        let result = self.mirror_with_cancellation(token).await;

        watcher.abort();
        result
    }

    // Mirrors the site under a caller-provided cancellation token
    pub async fn mirror_with_cancellation(
        self: Arc<Self>,
        token: CancellationToken,
    ) -> Result<CrawlReport, MirrorError> {
        let start = self.scope.start().clone();
        info!(
            start = %start,
            destination = %self.writer.dest_dir().display(),
            resumed = self.visited.len(),
            "starting mirror"
        );

        Arc::clone(&self).download(start, token).await?;

        Ok(self.stats.snapshot())
    }

    // Downloads `url` and, recursively, everything in scope it links to
    //
    // Boxed so the future can name itself and be handed to tokio::spawn.
    fn download(
        self: Arc<Self>,
        url: Url,
        token: CancellationToken,
    ) -> BoxFuture<'static, Result<(), MirrorError>> {
        async move {
            let key = normalize(url.as_str());
            if self.visited.claim(&key) {
                debug!(url = %url, "already visited");
                self.stats.duplicate_link();
                return Ok(());
            }

            let body = match self.fetch(&url, &key).await? {
                FetchOutcome::Stored { path, body } => {
                    info!(url = %url, path = %path.display(), bytes = body.len(), "saved page");
                    self.stats.page_written();
                    body
                }
                FetchOutcome::AlreadyOnDisk(path) => {
                    debug!(url = %url, path = %path.display(), "skipping page saved earlier");
                    self.stats.page_on_disk();
                    return Ok(());
                }
            };

            let children = child_links(&body, &url, &self.scope)?;
            drop(body);

            let mut tasks = JoinSet::new();
            for child in children {
                let crawler = Arc::clone(&self);
                let token = token.clone();
                tasks.spawn(async move {
                    if token.is_cancelled() {
                        info!(url = %child, "Exiting...");
                        crawler.stats.cancelled_link();
                        return Ok(());
                    }
                    crawler.download(child, token).await
                });
            }

            let mut failures = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => failures.push(e),
                    Err(e) => failures.push(MirrorError::Task(e)),
                }
            }

            MirrorError::collect(failures)
        }
        .boxed()
    }

    // Runs the fetch, holding a permit when concurrency is capped
    //
    // The permit is released before the caller waits on its children,
    // otherwise a deep crawl could hold every permit while blocked.
    async fn fetch(&self, url: &Url, key: &str) -> Result<FetchOutcome, MirrorError> {
        let _permit = match &self.fetch_permits {
            Some(permits) => permits.acquire().await.ok(),
            None => None,
        };
        self.writer.fetch(url, key).await
    }
}

// Cancels `token` on the first Ctrl-C or SIGTERM
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("interrupt received, finishing in-flight downloads");
    token.cancel();
}
