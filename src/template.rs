//! Template loading and placeholder composition.
//!
//! Templates are plain files containing literal placeholder markers. The
//! page template wraps every rendered document; the homepage template wraps
//! the post list. Both carry a main-content marker and a navigation marker:
//!
//! ```text
//! <main>{INSERT_MAIN}</main>
//! <aside>{INSERT_NAV}</aside>
//! ```
//!
//! Composition is single-shot string substitution: each placeholder is
//! replaced **exactly once** (first occurrence only), and markers with no
//! matching substitution are left verbatim in the output. That replace-first
//! behavior is a contract, not an accident — downstream fragments may
//! legally contain text that looks like a marker, and it must survive.
//!
//! Templates are loaded once at build start and are immutable for the run.
//! A missing or unreadable template is fatal: there is no page without one.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::TemplatesConfig;

/// Main-content placeholder in the page and homepage templates.
pub const INSERT_MAIN: &str = "{INSERT_MAIN}";
/// Navigation placeholder in the page and homepage templates.
pub const INSERT_NAV: &str = "{INSERT_NAV}";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The two site templates, loaded once and shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Per-document page template.
    pub page: String,
    /// Homepage template.
    pub home: String,
}

impl Templates {
    /// Load both templates relative to the content root. Any failure here
    /// aborts the build.
    pub fn load(root: &Path, config: &TemplatesConfig) -> Result<Self, TemplateError> {
        Ok(Self {
            page: read_template(&root.join(&config.page))?,
            home: read_template(&root.join(&config.home))?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Substitute placeholders into a template.
///
/// Each `(placeholder, value)` pair replaces the **first** occurrence of the
/// placeholder only. Placeholders absent from the template are ignored;
/// markers without a substitution stay in the output unchanged.
pub fn compose(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (placeholder, value) in substitutions {
        out = out.replacen(placeholder, value, 1);
    }
    out
}
