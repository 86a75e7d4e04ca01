//! # Simple Blog
//!
//! A minimal static site generator for dated blog posts. Your filesystem is
//! the data source: a directory per post, a filename encoding the
//! publication date, and an `index.md` where a directory should be a
//! generic page rather than a post.
//!
//! # Architecture: One Pass, Two Fragments
//!
//! A build runs the pipeline once, front to back:
//!
//! ```text
//! 1. Scan      content tree  →  relative paths of eligible .md files
//! 2. Classify  path          →  NavEntry (group, date, year, title, link, kind)
//! 3. Navigate  all entries   →  nav fragment + homepage post list (once)
//! 4. Render    each document →  markdown → HTML → page template → index.html
//! 5. Compose   homepage      →  post list + nav → root index.html
//! ```
//!
//! The navigation step needs the complete entry list before it can sort and
//! group, so it runs after the scan as a single synchronous pass. Document
//! rendering has no cross-document dependencies and fans out across a rayon
//! worker pool; the shared nav fragment, templates, and config are
//! read-only during that phase.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | walks the content tree, yields eligible document paths |
//! | [`classify`] | parses a path into a `NavEntry` (the nav builder's input) |
//! | [`nav`] | the ordering core — groups, sorts, renders both nav fragments |
//! | [`markdown`] | pulldown-cmark adapter: heading ids, TOC, lazy images |
//! | [`template`] | template loading and replace-first placeholder composition |
//! | [`build`] | pipeline orchestration, worker fan-out, per-document skips |
//! | [`config`] | optional `config.toml`, loaded once, passed by reference |
//! | [`output`] | CLI output formatting — pure `format_*` plus `print_*` |
//!
//! # Design Decisions
//!
//! ## Dates Are Parsed Once, Up Front
//!
//! A post's filename must be a real `YYYY-MM-DD` calendar date. The
//! classifier parses it exactly once and carries the parsed date on the
//! entry, so every later sort compares totally-ordered keys. A filename
//! that fails to parse is a per-document diagnostic, never a silent
//! ordering bias.
//!
//! ## Literal Placeholder Templates
//!
//! Pages are composed by substituting `{INSERT_MAIN}` and `{INSERT_NAV}`
//! into plain template files — first occurrence only, unresolved markers
//! left verbatim. No template language, no runtime template state: the two
//! templates are read once at startup and shared read-only by all workers.
//!
//! ## Partial Success Is Valid Output
//!
//! Only a missing template, invalid config, or unreadable content root
//! aborts a build. A document that cannot be classified, read, or written
//! is skipped with a printed diagnostic and everything else still builds.

pub mod build;
pub mod classify;
pub mod config;
pub mod markdown;
pub mod nav;
pub mod output;
pub mod scan;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
