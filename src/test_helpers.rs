//! Shared test utilities for the simple-blog test suite.
//!
//! Builds throwaway content trees under a `TempDir` so unit tests can
//! exercise the scan → classify → build pipeline without fixture files.

use std::path::Path;

/// Write `content` at `rel` under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Write the default page and homepage templates into `root`, at the
/// locations the default [`SiteConfig`](crate::config::SiteConfig) expects.
///
/// Both carry the main-content and navigation markers wrapped in enough
/// structure to assert against.
pub fn default_templates(root: &Path) {
    write_file(
        root,
        "assets/templates/page.tpl",
        "<!doctype html>\n<html><body>\n<aside>{INSERT_NAV}</aside>\n<main>{INSERT_MAIN}</main>\n</body></html>\n",
    );
    write_file(
        root,
        "assets/templates/index.tpl",
        "<!doctype html>\n<html><body>\n<aside>{INSERT_NAV}</aside>\n<section>{INSERT_MAIN}</section>\n</body></html>\n",
    );
}
