// src/crawl/naming.rs
// =============================================================================
// Turns a URL into the name we use for it everywhere.
//
// The same string is:
// - the file name of the saved page inside the destination directory
// - the key stored in the visited registry
//
// Because both sides use one name, a later run can rebuild the visited set
// just by listing the destination directory.
//
// The transform is lossy: "http://h/a.b" and "http://h/a/b" both become
// "http__h_a_b". Such URLs are treated as the same page.
// =============================================================================

// File name used when a URL normalizes to nothing at all
pub const FALLBACK_FILE_NAME: &str = "index.html";

// Maps a URL string to its normalized key
//
// Applied in order:
//   1. drop every ':'
//   2. replace every '.' with '_'
//   3. replace every '/' with '_'
//
// Example:
//   "https://example.com/docs/" -> "https__example_com_docs_"
pub fn normalize(url: &str) -> String {
    url.replace(':', "").replace('.', "_").replace('/', "_")
}

// Picks the on-disk file name for a normalized key
pub fn file_name_for(key: &str) -> &str {
    if key.is_empty() {
        FALLBACK_FILE_NAME
    } else {
        key
    }
}
