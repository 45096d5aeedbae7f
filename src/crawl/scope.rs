// src/crawl/scope.rs
// =============================================================================
// Decides which URLs belong to the mirror.
//
// A URL is in scope when it has:
// - the same scheme as the start URL
// - the same host (and port) as the start URL
// - a path equal to the start path, or nested under it
//
// Query strings are ignored here. Links carrying a '#' are dropped by the
// link extractor, not by this predicate.
//
// Rust concepts:
// - Url accessors: scheme(), host_str(), port() and path() return borrowed
//   pieces of the parsed URL, so comparing them allocates nothing
// - Early return with `?`: parse errors become MirrorError in one step
// =============================================================================

use super::error::MirrorError;
use url::Url;

// Parses and validates the user-supplied start URL
//
// Parameters:
//   input: the start URL exactly as typed on the command line
//
// Returns: the parsed Url, or InvalidStartUrl when it does not parse or
// its scheme is not http/https
//
// Example:
//   "https://example.com/docs" -> Ok(Url)
//   "::::"                     -> Err(relative URL without a base)
pub fn parse_start_url(input: &str) -> Result<Url, MirrorError> {
    let url = Url::parse(input).map_err(|e| MirrorError::InvalidStartUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(MirrorError::InvalidStartUrl {
            input: input.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

// The subtree of one origin that a crawl is allowed to visit
#[derive(Debug, Clone)]
pub struct Scope {
    start: Url,
    // Start path without its trailing '/', followed by a single '/'
    child_prefix: String,
}

impl Scope {
    pub fn new(start: Url) -> Self {
        let child_prefix = format!("{}/", start.path().trim_end_matches('/'));
        Self {
            start,
            child_prefix,
        }
    }

    pub fn start(&self) -> &Url {
        &self.start
    }

    // The scope predicate
    //
    // Returns: true when `url` has the start URL's scheme, host and port,
    // and its path is the start path or lies under it
    //
    // Example (start = http://h/a):
    //   http://h/a/sub -> true
    //   http://h/ab    -> false (sibling, not a child)
    pub fn contains(&self, url: &Url) -> bool {
        if url.scheme() != self.start.scheme()
            || url.host_str() != self.start.host_str()
            || url.port() != self.start.port()
        {
            return false;
        }

        url.path() == self.start.path() || url.path().starts_with(&self.child_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(start: &str) -> Scope {
        Scope::new(Url::parse(start).unwrap())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_start_itself_is_in_scope() {
        let s = scope("http://h/a");
        assert!(s.contains(&url("http://h/a")));
        assert!(s.contains(&url("http://h/a?page=2")));
    }

    #[test]
    fn test_children_are_in_scope() {
        let s = scope("http://h/a");
        assert!(s.contains(&url("http://h/a/sub")));
        assert!(s.contains(&url("http://h/a/sub/deeper")));
    }

    #[test]
    fn test_trailing_slash_start_admits_children() {
        let s = scope("http://h/a/");
        assert!(s.contains(&url("http://h/a/")));
        assert!(s.contains(&url("http://h/a/b")));
        assert!(!s.contains(&url("http://h/x")));
    }

    #[test]
    fn test_sibling_and_parent_paths_are_out() {
        let s = scope("http://h/a");
        assert!(!s.contains(&url("http://h/ab")));
        assert!(!s.contains(&url("http://h/")));
        assert!(!s.contains(&url("http://h/b/a")));
    }

    #[test]
    fn test_other_host_scheme_or_port_is_out() {
        let s = scope("http://h/a");
        assert!(!s.contains(&url("http://other/a")));
        assert!(!s.contains(&url("https://h/a")));
        assert!(!s.contains(&url("http://h:8080/a")));
    }

    #[test]
    fn test_root_start_covers_whole_host() {
        let s = scope("http://h");
        assert!(s.contains(&url("http://h/")));
        assert!(s.contains(&url("http://h/anything/at/all")));
    }

    #[test]
    fn test_parse_start_url_rejects_garbage() {
        assert!(parse_start_url("::::").is_err());
        assert!(parse_start_url("badurl").is_err());
        assert!(parse_start_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_parse_start_url_accepts_http() {
        let url = parse_start_url("https://example.com/docs").unwrap();
        assert_eq!(url.path(), "/docs");
    }
}
