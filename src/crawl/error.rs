// src/crawl/error.rs
// =============================================================================
// Errors produced while mirroring a site.
//
// Argument errors and resume errors happen before anything is fetched.
// Transport, Io and Parse errors end one branch of the crawl and travel up
// to the parent task. When several children fail, the parent reports all
// of them together as `Branches`.
//
// Rust concepts:
// - thiserror: #[error(...)] writes the Display impl, #[source] and #[from]
//   wire up Error::source() and the `?` conversion
// - anyhow in main.rs accepts any of these errors through `?`
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("invalid start URL '{input}': {reason}")]
    InvalidStartUrl { input: String, reason: String },

    #[error("invalid destination directory '{}': {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    #[error("could not load already visited files from '{}': {source}", path.display())]
    ResumeLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not download {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read html body of {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("crawl task did not finish: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{} links failed to download, first: {}", .0.len(), first_message(.0))]
    Branches(Vec<MirrorError>),
}

impl MirrorError {
    // Folds the failures of a set of sibling tasks into one result
    //
    // Parameters:
    //   failures: the errors returned by the child tasks, in completion order
    //
    // Returns: Ok(()) for none, the error itself for one, Branches for more
    //
    // Nested `Branches` are flattened so the list always holds leaf errors.
    pub fn collect(failures: Vec<MirrorError>) -> Result<(), MirrorError> {
        let mut leaves = Vec::with_capacity(failures.len());
        for failure in failures {
            match failure {
                MirrorError::Branches(inner) => leaves.extend(inner),
                other => leaves.push(other),
            }
        }

        match leaves.len() {
            0 => Ok(()),
            1 => Err(leaves.remove(0)),
            _ => Err(MirrorError::Branches(leaves)),
        }
    }
}

fn first_message(errors: &[MirrorError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}
