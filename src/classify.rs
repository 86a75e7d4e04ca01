//! Path classification: turning a document path into a navigation record.
//!
//! Every eligible markdown file follows the same path convention:
//!
//! ```text
//! <group>/<subgroup>/<YYYY-MM-DD>.md    # dated post
//! <group>/<subgroup>/index.md           # generic page
//! ```
//!
//! The group is a top-level content category, the subgroup is the post (or
//! page) directory, and the filename stem is either an ISO-8601 date or the
//! literal `index`. From one path the classifier derives everything the
//! navigation builder needs: the destination directory, the date token and
//! its year, the display title, the link URL, and whether the document is a
//! dated post or a generic page.
//!
//! ## Display Titles
//!
//! The title comes from the subgroup segment: dashes become spaces, then
//! every word is capitalized (plain title case, no minor-word exception
//! list):
//! - `a/first-post/2024-01-10.md` → "First Post"
//! - `notes/about-me/index.md` → "About Me"

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("path has fewer than 3 segments: {0}")]
    MalformedPath(PathBuf),
    #[error("date token '{token}' in {path} is not a valid YYYY-MM-DD date")]
    UnparsableDate { path: PathBuf, token: String },
}

/// Whether a document is a dated post or a generic page.
///
/// A pure function of the date token: `index` means page, anything else is
/// a post. Posts appear on the homepage and in a year section of the nav;
/// pages appear only in the nav's "Pages" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Post,
    Page,
}

/// A classified document, ready for the navigation builder.
#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    /// Destination directory (`group/subgroup`) for the rendered page.
    pub group_path: String,
    /// Filename stem: an ISO-8601 date or the literal `index`.
    pub date_token: String,
    /// `YYYY` prefix of the date token, or `index` for pages.
    pub year: String,
    /// Display title from the subgroup segment (dashes → spaces, title-cased).
    pub title: String,
    /// Destination URL: link root prefix + group path + `index.html`.
    pub link: String,
    pub kind: EntryKind,
    /// Parsed calendar date. Always `Some` for posts, `None` for pages.
    /// Carried here so sorting never re-parses the token.
    #[serde(skip)]
    pub date: Option<NaiveDate>,
}

/// Classify a relative document path into a [`NavEntry`].
///
/// Fails with [`ClassifyError::MalformedPath`] when the path has fewer than
/// three segments (or a non-UTF-8 segment), and with
/// [`ClassifyError::UnparsableDate`] when a post's filename stem is not a
/// real `YYYY-MM-DD` date. Both are per-document errors: callers log them
/// and continue with the rest of the build.
pub fn classify(path: &Path, link_root_prefix: &str) -> Result<NavEntry, ClassifyError> {
    let segments: Vec<&str> = path
        .iter()
        .map(|s| s.to_str())
        .collect::<Option<_>>()
        .ok_or_else(|| ClassifyError::MalformedPath(path.to_path_buf()))?;

    if segments.len() < 3 {
        return Err(ClassifyError::MalformedPath(path.to_path_buf()));
    }

    let group_path = format!("{}/{}", segments[0], segments[1]);
    let date_token = Path::new(segments[segments.len() - 1])
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    // The year is everything before the first dash. `index` has no dash, so
    // it collapses into its own literal "year", which marks the entry as a
    // generic page.
    let year = match date_token.find('-') {
        Some(pos) => date_token[..pos].to_string(),
        None => date_token.clone(),
    };

    let (kind, date) = if year == "index" {
        (EntryKind::Page, None)
    } else {
        let date = NaiveDate::parse_from_str(&date_token, "%Y-%m-%d").map_err(|_| {
            ClassifyError::UnparsableDate {
                path: path.to_path_buf(),
                token: date_token.clone(),
            }
        })?;
        (EntryKind::Post, Some(date))
    };

    Ok(NavEntry {
        link: join_link(link_root_prefix, &group_path),
        title: title_case(&segments[1].replace('-', " ")),
        group_path,
        date_token,
        year,
        kind,
        date,
    })
}

/// Capitalize the first letter of every whitespace-separated word.
///
/// Standard title case with no minor-word exception list, matching how the
/// subgroup names are meant to read ("my-first-post" → "My First Post").
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Join the link root prefix, group path, and `index.html` with single
/// slashes. The prefix is a URL fragment, not a filesystem path.
fn join_link(prefix: &str, group_path: &str) -> String {
    let mut link = prefix.to_string();
    if !link.is_empty() && !link.ends_with('/') {
        link.push('/');
    }
    link.push_str(group_path);
    link.push_str("/index.html");
    link
}
