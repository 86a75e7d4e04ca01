//! CLI output formatting.
//!
//! Each surface has a `format_*` function returning lines for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 First Post
//!     Date: 2024-01-10
//!     Source: a/first-post/2024-01-10.md
//!
//! Pages
//! 001 About
//!     Source: b/about/index.md
//! ```
//!
//! ## Build
//!
//! One line per output file as it lands (the workers finish in no particular
//! order), then a summary:
//!
//! ```text
//! rendered: a/first-post/2024-01-10.md -> a/first-post/index.html
//! skipped: orphan.md: path has fewer than 3 segments: orphan.md
//! Wrote 3 files (2 posts, 1 pages)
//! ```

use crate::build::{BuildEvent, BuildSummary, Inventory};
use crate::classify::EntryKind;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

/// Format the scan inventory: posts, pages, and skipped paths.
pub fn format_scan_output(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::new();

    let posts: Vec<_> = inventory
        .documents
        .iter()
        .filter(|d| d.entry.kind == EntryKind::Post)
        .collect();
    let pages: Vec<_> = inventory
        .documents
        .iter()
        .filter(|d| d.entry.kind == EntryKind::Page)
        .collect();

    if !posts.is_empty() {
        lines.push("Posts".to_string());
        for (i, doc) in posts.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), doc.entry.title));
            lines.push(format!("    Date: {}", doc.entry.date_token));
            lines.push(format!("    Source: {}", doc.source.display()));
        }
    }

    if !pages.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Pages".to_string());
        for (i, doc) in pages.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), doc.entry.title));
            lines.push(format!("    Source: {}", doc.source.display()));
        }
    }

    if !inventory.skipped.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Skipped".to_string());
        for skip in &inventory.skipped {
            lines.push(format!("    {}: {}", skip.source, skip.reason));
        }
    }

    if lines.is_empty() {
        lines.push("No documents found".to_string());
    }

    lines
}

/// Format one build progress event.
pub fn format_build_event(event: &BuildEvent) -> String {
    match event {
        BuildEvent::Rendered { source, dest } => format!("rendered: {source} -> {dest}"),
        BuildEvent::Skipped { source, reason } => format!("skipped: {source}: {reason}"),
    }
}

/// Format the end-of-build summary.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Wrote {} files ({} posts, {} pages)",
        summary.written, summary.posts, summary.pages
    )];
    if !summary.skipped.is_empty() {
        lines.push(format!("Skipped {} documents:", summary.skipped.len()));
        for skip in &summary.skipped {
            lines.push(format!("    {}: {}", skip.source, skip.reason));
        }
    }
    lines
}

pub fn print_scan_output(inventory: &Inventory) {
    for line in format_scan_output(inventory) {
        println!("{line}");
    }
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{line}");
    }
}
