// src/crawl/fetch.rs
// =============================================================================
// This module downloads one page and saves it to the destination directory.
//
// How it works:
// 1. Issue a GET for the page
// 2. Work out the file name from the page's normalized key
// 3. If that file already exists, stop here (an earlier run saved it)
// 4. Otherwise stream the body into the new file while also keeping a copy
//    in memory, because the network body can only be read once and the
//    link extractor needs it afterwards
//
// The status code is not checked: whatever body the server sends is saved.
//
// Rust concepts:
// - response.chunk(): reads the body piece by piece instead of all at once
// - OpenOptions::create_new: fails with AlreadyExists instead of truncating
// - Closures as error mappers: `map_err(io_error)` attaches the file path
// =============================================================================

use super::error::MirrorError;
use super::naming::file_name_for;
use reqwest::Client;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

// What happened to a page after its GET
#[derive(Debug)]
pub enum FetchOutcome {
    /// The body was written to `path`; `body` holds the same bytes
    Stored { path: PathBuf, body: Vec<u8> },
    /// A file for this page was already present, nothing was written
    AlreadyOnDisk(PathBuf),
}

// Fetches pages and writes them into one destination directory
#[derive(Debug, Clone)]
pub struct PageWriter {
    client: Client,
    dest_dir: PathBuf,
}

impl PageWriter {
    pub fn new(dest_dir: impl Into<PathBuf>, timeout: Option<Duration>) -> Result<Self, MirrorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(MirrorError::Client)?;

        Ok(Self {
            client,
            dest_dir: dest_dir.into(),
        })
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    // Downloads `url` and saves it under the file name derived from `key`
    //
    // Parameters:
    //   url: the page to download
    //   key: its normalized name, already claimed in the visited registry
    //
    // Returns:
    //   Stored { path, body } when the page was written
    //   AlreadyOnDisk(path) when a file of that name was already there
    //   Transport / Io errors when the download or the write failed
    pub async fn fetch(&self, url: &Url, key: &str) -> Result<FetchOutcome, MirrorError> {
        let transport_error = |source| MirrorError::Transport {
            url: url.to_string(),
            source,
        };

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "saving non-success response");
        }

        let path = self.dest_dir.join(file_name_for(key));
        let io_error = |source| MirrorError::Io {
            path: path.clone(),
            source,
        };

        if tokio::fs::try_exists(&path).await.map_err(io_error)? {
            debug!(url = %url, path = %path.display(), "page already on disk");
            return Ok(FetchOutcome::AlreadyOnDisk(path));
        }

        // create_new keeps two writers from sharing a file name
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(url = %url, path = %path.display(), "page written concurrently");
                return Ok(FetchOutcome::AlreadyOnDisk(path));
            }
            Err(e) => return Err(io_error(e)),
        };

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            file.write_all(&chunk).await.map_err(io_error)?;
            body.extend_from_slice(&chunk);
        }
        file.flush().await.map_err(io_error)?;

        Ok(FetchOutcome::Stored { path, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::naming::normalize;
    use crate::crawl::test_site::TestSite;

    #[tokio::test]
    async fn test_fetch_tees_body_to_disk() {
        let site = TestSite::serve(&[("/a", "<a href=\"/a/b\">b</a>")]).await;
        let dest = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(dest.path(), None).unwrap();

        let url = site.url("/a");
        let key = normalize(url.as_str());
        let outcome = writer.fetch(&url, &key).await.unwrap();

        match outcome {
            FetchOutcome::Stored { path, body } => {
                assert_eq!(path, dest.path().join(&key));
                assert_eq!(body, b"<a href=\"/a/b\">b</a>");
                assert_eq!(std::fs::read(&path).unwrap(), body);
            }
            other => panic!("expected Stored, got {other:?}"),
        }
        assert_eq!(site.hits("/a"), 1);
    }

    #[tokio::test]
    async fn test_existing_file_is_left_alone() {
        let site = TestSite::serve(&[("/a", "fresh")]).await;
        let dest = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(dest.path(), None).unwrap();

        let url = site.url("/a");
        let key = normalize(url.as_str());
        std::fs::write(dest.path().join(&key), "stale").unwrap();

        let outcome = writer.fetch(&url, &key).await.unwrap();

        match outcome {
            FetchOutcome::AlreadyOnDisk(path) => assert_eq!(path, dest.path().join(&key)),
            other => panic!("expected AlreadyOnDisk, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(dest.path().join(&key)).unwrap(), "stale");
    }

    #[tokio::test]
    async fn test_empty_key_falls_back_to_index() {
        let site = TestSite::serve(&[("/", "root")]).await;
        let dest = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(dest.path(), None).unwrap();

        let outcome = writer.fetch(&site.url("/"), "").await.unwrap();

        assert!(matches!(outcome, FetchOutcome::Stored { .. }));
        assert!(dest.path().join("index.html").is_file());
    }

    #[tokio::test]
    async fn test_not_found_body_is_still_saved() {
        let site = TestSite::serve(&[]).await;
        let dest = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(dest.path(), None).unwrap();

        let url = site.url("/missing");
        let outcome = writer.fetch(&url, &normalize(url.as_str())).await.unwrap();

        assert!(matches!(outcome, FetchOutcome::Stored { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let dest = tempfile::tempdir().unwrap();
        let writer = PageWriter::new(dest.path(), None).unwrap();

        let url = TestSite::unreachable_url("/a");
        let err = writer.fetch(&url, &normalize(url.as_str())).await.unwrap_err();

        assert!(matches!(err, MirrorError::Transport { .. }));
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
    }
}
