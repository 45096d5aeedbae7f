// src/crawl/links.rs
// =============================================================================
// This module finds the pages a saved page links to.
//
// We use the `scraper` crate to parse the HTML and select every <a href>,
// then the `url` crate to resolve each href against the page's own URL.
//
// A link survives only when:
// - its href parses (a bad href is skipped, it never fails the page)
// - the resolved URL is inside the crawl scope
// - the resolved URL has no '#' in it
//
// Links come back in document order. Duplicates are kept; the visited
// registry absorbs them later.
// =============================================================================

use super::error::MirrorError;
use super::scope::Scope;
use scraper::{Html, Selector};
use url::Url;

// Returns the raw href value of every anchor element, in document order
pub fn anchor_hrefs(html: &str) -> Result<Vec<String>, MirrorError> {
    let document = Html::parse_document(html);

    let selector = Selector::parse("a[href]").map_err(|e| MirrorError::Parse {
        url: String::new(),
        reason: format!("invalid anchor selector: {:?}", e),
    })?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}

// Extracts the in-scope child links of a page
//
// Parameters:
//   body: the page bytes exactly as they were saved
//   base: the URL the page was fetched from
//   scope: the crawl scope
pub fn child_links(body: &[u8], base: &Url, scope: &Scope) -> Result<Vec<Url>, MirrorError> {
    let html = String::from_utf8_lossy(body);

    let hrefs = anchor_hrefs(&html).map_err(|e| match e {
        MirrorError::Parse { reason, .. } => MirrorError::Parse {
            url: base.to_string(),
            reason,
        },
        other => other,
    })?;

    Ok(hrefs
        .iter()
        .filter_map(|href| base.join(href).ok())
        .filter(|url| scope.contains(url) && !url.as_str().contains('#'))
        .collect())
}
