//! Build orchestration.
//!
//! Runs the whole pipeline for one invocation:
//!
//! ```text
//! scan → classify → nav fragments (once) → render each document → homepage
//! ```
//!
//! The scan and classification happen up front because the navigation
//! builder needs the complete entry list before it can sort and group.
//! After that, document rendering fans out across the rayon pool — each
//! worker owns its document exclusively, and the nav fragment, templates,
//! and config are shared read-only. `par_iter` does not return until every
//! worker has finished, which is the completion guarantee the caller relies
//! on before reporting success.
//!
//! Progress and per-document diagnostics are emitted as [`BuildEvent`]s over
//! an optional channel so the CLI can print them live; the channel closes
//! when the build returns and every sender clone has been dropped.
//!
//! ## Failure policy
//!
//! Only scan-root failures abort a build (the caller additionally treats
//! missing templates and invalid config as fatal before calling in). A
//! document that cannot be classified, read, or written is skipped with a
//! diagnostic and the rest of the build proceeds; partial output is valid
//! output.

use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use crate::classify::{self, EntryKind, NavEntry};
use crate::config::SiteConfig;
use crate::markdown::render_markdown;
use crate::nav;
use crate::scan::{self, ScanError};
use crate::template::{self, INSERT_MAIN, INSERT_NAV, Templates};

/// A classified document and the relative source path it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub source: PathBuf,
    pub entry: NavEntry,
}

/// A per-document diagnostic: the document was left out of the build.
#[derive(Debug, Clone, Serialize)]
pub struct Skip {
    pub source: String,
    pub reason: String,
}

/// Everything the scan and classification stages produced. Serialized as-is
/// by `scan --json`.
#[derive(Debug, Serialize)]
pub struct Inventory {
    pub documents: Vec<Document>,
    pub skipped: Vec<Skip>,
}

/// Progress events emitted while building.
#[derive(Debug)]
pub enum BuildEvent {
    Rendered { source: String, dest: String },
    Skipped { source: String, reason: String },
}

/// Totals for one completed build.
#[derive(Debug)]
pub struct BuildSummary {
    /// Output files written, homepage included.
    pub written: usize,
    pub posts: usize,
    pub pages: usize,
    pub skipped: Vec<Skip>,
}

/// Scan the content tree and classify every eligible document.
///
/// Classification failures do not abort: the offending path is recorded in
/// `skipped` and the rest of the inventory is unaffected.
pub fn inventory(root: &Path, config: &SiteConfig) -> Result<Inventory, ScanError> {
    let paths = scan::scan(root, &config.skip_dirs)?;

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match classify::classify(&path, &config.link_root_prefix) {
            Ok(entry) => documents.push(Document { source: path, entry }),
            Err(err) => skipped.push(Skip {
                source: path.display().to_string(),
                reason: err.to_string(),
            }),
        }
    }

    Ok(Inventory { documents, skipped })
}

/// Run the full build. Output files land under `output_root`, which defaults
/// to the content root itself at the CLI level.
pub fn build(
    root: &Path,
    output_root: &Path,
    config: &SiteConfig,
    templates: &Templates,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, ScanError> {
    let Inventory { documents, mut skipped } = inventory(root, config)?;

    for skip in &skipped {
        send(events.as_ref(), BuildEvent::Skipped {
            source: skip.source.clone(),
            reason: skip.reason.clone(),
        });
    }

    let entries: Vec<NavEntry> = documents.iter().map(|d| d.entry.clone()).collect();
    let nav_fragment = nav::build_nav(&entries);
    let homepage_posts = nav::build_homepage_posts(&entries);

    let results: Vec<Result<(), Skip>> = documents
        .par_iter()
        .map_with(events.clone(), |tx, doc| {
            match render_document(root, output_root, doc, &templates.page, &nav_fragment) {
                Ok(dest) => {
                    send(tx.as_ref(), BuildEvent::Rendered {
                        source: doc.source.display().to_string(),
                        dest,
                    });
                    Ok(())
                }
                Err(skip) => {
                    send(tx.as_ref(), BuildEvent::Skipped {
                        source: skip.source.clone(),
                        reason: skip.reason.clone(),
                    });
                    Err(skip)
                }
            }
        })
        .collect();

    let mut written = 0;
    for result in results {
        match result {
            Ok(()) => written += 1,
            Err(skip) => skipped.push(skip),
        }
    }

    // Homepage: composed once from the full post list and the shared nav.
    let home_html = template::compose(&templates.home, &[
        (INSERT_MAIN, homepage_posts.as_str()),
        (INSERT_NAV, nav_fragment.as_str()),
    ]);
    match fs::write(output_root.join("index.html"), home_html) {
        Ok(()) => {
            written += 1;
            send(events.as_ref(), BuildEvent::Rendered {
                source: config.templates.home.clone(),
                dest: "index.html".to_string(),
            });
        }
        Err(err) => {
            let skip = Skip {
                source: config.templates.home.clone(),
                reason: format!("failed to write homepage: {err}"),
            };
            send(events.as_ref(), BuildEvent::Skipped {
                source: skip.source.clone(),
                reason: skip.reason.clone(),
            });
            skipped.push(skip);
        }
    }

    Ok(BuildSummary {
        written,
        posts: entries.iter().filter(|e| e.kind == EntryKind::Post).count(),
        pages: entries.iter().filter(|e| e.kind == EntryKind::Page).count(),
        skipped,
    })
}

/// Render one document: read, convert, compose, write. Every failure mode
/// here is per-document.
fn render_document(
    root: &Path,
    output_root: &Path,
    doc: &Document,
    page_template: &str,
    nav_fragment: &str,
) -> Result<String, Skip> {
    let source = root.join(&doc.source);
    let per_doc = |reason: String| Skip {
        source: doc.source.display().to_string(),
        reason,
    };

    let md = fs::read_to_string(&source)
        .map_err(|err| per_doc(format!("failed to read file: {err}")))?;
    let body = render_markdown(&md);
    let html = template::compose(page_template, &[
        (INSERT_MAIN, body.as_str()),
        (INSERT_NAV, nav_fragment),
    ]);

    let dest_dir = output_root.join(&doc.entry.group_path);
    fs::create_dir_all(&dest_dir)
        .map_err(|err| per_doc(format!("failed to create directory: {err}")))?;
    fs::write(dest_dir.join("index.html"), html)
        .map_err(|err| per_doc(format!("failed to write file: {err}")))?;

    Ok(format!("{}/index.html", doc.entry.group_path))
}

fn send(tx: Option<&Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = tx {
        // The printer may have gone away; losing progress lines is fine.
        let _ = tx.send(event);
    }
}
