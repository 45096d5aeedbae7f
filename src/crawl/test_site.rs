// src/crawl/test_site.rs
// =============================================================================
// An in-process website for tests.
//
// It serves a fixed set of HTML pages by path, answers 404 for anything
// else, and counts every request per path so tests can check exactly which
// URLs the crawler fetched and how often.
// =============================================================================

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use url::Url;

struct SiteState {
    pages: Mutex<HashMap<String, String>>,
    hits: Mutex<HashMap<String, usize>>,
}

pub struct TestSite {
    addr: SocketAddr,
    state: Arc<SiteState>,
}

impl TestSite {
    // Starts serving `pages` (path, html) on a random local port
    pub async fn serve(pages: &[(&str, &str)]) -> Self {
        let state = Arc::new(SiteState {
            pages: Mutex::new(
                pages
                    .iter()
                    .map(|(path, html)| (path.to_string(), html.to_string()))
                    .collect(),
            ),
            hits: Mutex::new(HashMap::new()),
        });

        let app = Router::new().fallback(serve_page).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    // A URL on a port where nothing is listening
    pub fn unreachable_url(path: &str) -> Url {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        Url::parse(&format!("http://127.0.0.1:{}{}", port, path)).unwrap()
    }

    // Adds or replaces a page, for pages that need to know the site's port
    pub fn set_page(&self, path: &str, html: &str) {
        self.state
            .pages
            .lock()
            .unwrap()
            .insert(path.to_string(), html.to_string());
    }

    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }
}

async fn serve_page(State(state): State<Arc<SiteState>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    *state.hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    let page = state.pages.lock().unwrap().get(&path).cloned();
    match page {
        Some(html) => Html(html).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
