// src/crawl/destination.rs
// =============================================================================
// Everything that touches the destination directory before the crawl starts.
//
// - `prepare` makes sure the directory exists (creating it with 0755)
// - `load_visited` lists it and seeds the visited registry, which is what
//   lets a second run pick up where the first one stopped
//
// Both run once, before the async crawl starts, so they use plain std::fs.
//
// Rust concepts:
// - #[cfg(unix)]: picks the Unix-only DirBuilderExt code path at compile time
// - Match guards: `Ok(meta) if meta.is_dir()` tests a condition inside a match arm
// =============================================================================

use super::error::MirrorError;
use super::visited::VisitedRegistry;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

// Creates the destination directory if it is missing
//
// Parameters:
//   path: the destination given on the command line
//
// Returns: Ok(()) when `path` is (now) a directory, InvalidDestination when
// it exists but is something else or cannot be created
pub fn prepare(path: &Path) -> Result<(), MirrorError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(MirrorError::InvalidDestination {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            create_dir(path).map_err(|e| MirrorError::InvalidDestination {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
        Err(e) => Err(MirrorError::InvalidDestination {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(unix)]
fn create_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

// Builds the visited registry from the files already in `path`
//
// Parameters:
//   path: a prepared destination directory
//
// Returns: a registry holding one key per directory entry, or ResumeLoad
// when the directory cannot be listed
//
// Each entry contributes its name minus any trailing extension
// ("page.html" -> "page"). Names this tool writes never contain a '.',
// so for them the strip changes nothing.
pub fn load_visited(path: &Path) -> Result<VisitedRegistry, MirrorError> {
    let resume_error = |source| MirrorError::ResumeLoad {
        path: path.to_path_buf(),
        source,
    };

    let mut keys = Vec::new();
    for entry in fs::read_dir(path).map_err(resume_error)? {
        let entry = entry.map_err(resume_error)?;
        let name = entry.file_name();
        keys.push(strip_extension(&name.to_string_lossy()).to_string());
    }

    Ok(VisitedRegistry::from_keys(keys))
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}
