//! Document discovery.
//!
//! Walks the content tree and yields the relative paths of every eligible
//! markdown document, in a deterministic (filename-sorted) order.
//!
//! Eligibility rules:
//! - files with a `.md` extension, except `README.md`;
//! - directories whose name is on the skip list (`.git`, `assets`, `cmd` by
//!   default) are pruned entirely — traversal does not descend into them.
//!
//! The scanner only discovers paths. Classification, rendering, and writing
//! happen downstream, so a scan is cheap and side-effect free.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to walk content tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("path outside content root: {0}")]
    OutsideRoot(PathBuf),
}

/// Walk `root` and return the relative paths of all eligible documents.
///
/// Results are sorted by file name at every directory level, so repeated
/// scans of an unchanged tree produce the same sequence.
pub fn scan(root: &Path, skip_dirs: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, skip_dirs));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_eligible(entry.path()) {
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| ScanError::OutsideRoot(entry.path().to_path_buf()))?;
            paths.push(rel.to_path_buf());
        }
    }

    Ok(paths)
}

fn is_skipped_dir(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip_dirs.iter().any(|skip| skip == name))
}

fn is_eligible(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
        && path.file_name().is_some_and(|name| name != "README.md")
}
