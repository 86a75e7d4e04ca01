//! Navigation and homepage fragment construction.
//!
//! The core ordering subsystem. Takes the full list of classified entries
//! and renders two deterministic HTML fragments:
//!
//! - **Side navigation** ([`build_nav`]): an optional "Pages" section
//!   (generic pages, title-ascending) followed by one collapsible section
//!   per year (posts, date-descending, most recent year first).
//! - **Homepage post list** ([`build_homepage_posts`]): every dated post as
//!   an article block, date-descending. Generic pages never appear here.
//!
//! Both functions are pure: same entries in, same bytes out. Ordering rules:
//!
//! - Posts sort descending by parsed calendar date; ties keep encounter
//!   order (stable sort).
//! - Pages sort ascending by display title, lexicographic and
//!   case-sensitive; ties keep encounter order.
//! - Year sections appear in the order their first post appears in the
//!   date-descending sequence, so years run most-recent-first and each year
//!   occurs exactly once.
//!
//! Duplicate group paths are not deduplicated; every entry renders its own
//! fragment.

use crate::classify::{EntryKind, NavEntry};
use crate::template::compose;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Homepage article block, placeholders filled per post.
const ARTICLE_TEMPLATE: &str = "\
<article>
<h3>{TITLE}</h3>
<p class=\"pubdate\">{DATE}</p>
<ul class=\"actions\">
<li><a href=\"{LINK}\" class=\"button\">Read</a></li>
</ul>
</article>
";

/// Render the side-navigation fragment for the full entry set.
///
/// Empty input yields an empty string.
pub fn build_nav(entries: &[NavEntry]) -> String {
    let mut pages: Vec<&NavEntry> = entries.iter().filter(|e| e.kind == EntryKind::Page).collect();
    let mut posts: Vec<&NavEntry> = entries.iter().filter(|e| e.kind == EntryKind::Post).collect();

    // Stable sorts: equal keys keep their encounter order.
    pages.sort_by(|a, b| a.title.cmp(&b.title));
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let mut out = String::new();

    if !pages.is_empty() {
        render_section(&mut out, "Pages", &pages);
    }

    for (year, group) in group_by_year(&posts) {
        render_section(&mut out, year, &group);
    }

    out
}

/// Render the homepage post list: one article block per dated post,
/// date-descending. Page-kind entries are excluded.
pub fn build_homepage_posts(entries: &[NavEntry]) -> String {
    let mut posts: Vec<&NavEntry> = entries.iter().filter(|e| e.kind == EntryKind::Post).collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let mut out = String::new();
    for post in posts {
        out.push_str(&compose(
            ARTICLE_TEMPLATE,
            &[
                ("{TITLE}", &encode_text(&post.title)),
                ("{DATE}", &encode_text(&post.date_token)),
                ("{LINK}", &encode_double_quoted_attribute(&post.link)),
            ],
        ));
    }
    out
}

/// Group the already date-sorted posts by year, preserving first-encounter
/// order. Since input dates are totally ordered and descending, this yields
/// each year exactly once, most recent first.
fn group_by_year<'a>(posts: &[&'a NavEntry]) -> Vec<(&'a str, Vec<&'a NavEntry>)> {
    let mut years: Vec<(&'a str, Vec<&'a NavEntry>)> = Vec::new();
    for &post in posts {
        match years.iter_mut().find(|(year, _)| *year == post.year) {
            Some((_, group)) => group.push(post),
            None => years.push((post.year.as_str(), vec![post])),
        }
    }
    years
}

/// Render one collapsible nav section: a labeled `<details>` group holding
/// the given links in order.
fn render_section(out: &mut String, label: &str, entries: &[&NavEntry]) {
    out.push_str("<details open>\n<summary>");
    out.push_str(&encode_text(label));
    out.push_str("</summary>\n<ul>\n");
    for entry in entries {
        out.push_str(&render_nav_link(entry));
    }
    out.push_str("</ul>\n</details>\n");
}

fn render_nav_link(entry: &NavEntry) -> String {
    format!(
        "<li><a href=\"{}\">{}</a></li>\n",
        encode_double_quoted_attribute(&entry.link),
        encode_text(&entry.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use std::path::Path;

    fn entries(paths: &[&str]) -> Vec<NavEntry> {
        paths
            .iter()
            .map(|p| classify(Path::new(p), "/").unwrap())
            .collect()
    }

    /// Positions of needles within haystack, asserting all are present.
    fn ordered_positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
        needles
            .iter()
            .map(|n| {
                haystack
                    .find(n)
                    .unwrap_or_else(|| panic!("'{n}' not found in:\n{haystack}"))
            })
            .collect()
    }

    fn assert_order(haystack: &str, needles: &[&str]) {
        let positions = ordered_positions(haystack, needles);
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "wrong order in:\n{haystack}");
    }

    #[test]
    fn empty_input_yields_empty_fragments() {
        assert_eq!(build_nav(&[]), "");
        assert_eq!(build_homepage_posts(&[]), "");
    }

    #[test]
    fn homepage_never_includes_pages() {
        let entries = entries(&[
            "a/p1/2024-01-10.md",
            "b/p2/index.md",
            "a/p3/2023-12-05.md",
        ]);
        let html = build_homepage_posts(&entries);
        assert!(!html.contains("P2"));
        assert!(!html.contains("b/p2"));
    }

    #[test]
    fn homepage_posts_date_descending() {
        let entries = entries(&[
            "a/older/2023-12-05.md",
            "a/newest/2024-01-10.md",
            "a/oldest/2021-06-30.md",
        ]);
        let html = build_homepage_posts(&entries);
        assert_order(&html, &["2024-01-10", "2023-12-05", "2021-06-30"]);
    }

    #[test]
    fn homepage_article_shape() {
        let entries = entries(&["a/first-post/2024-01-10.md"]);
        let html = build_homepage_posts(&entries);
        assert!(html.contains("<h3>First Post</h3>"));
        assert!(html.contains("<p class=\"pubdate\">2024-01-10</p>"));
        assert!(html.contains("<a href=\"/a/first-post/index.html\" class=\"button\">Read</a>"));
    }

    #[test]
    fn mixed_content_pages_then_years() {
        let entries = entries(&[
            "a/p1/2024-01-10.md",
            "a/p1/2023-12-05.md",
            "b/p2/index.md",
        ]);

        let home = build_homepage_posts(&entries);
        assert_order(&home, &["2024-01-10", "2023-12-05"]);
        assert!(!home.contains("P2"));

        let nav = build_nav(&entries);
        assert_order(
            &nav,
            &[
                "<summary>Pages</summary>",
                "/b/p2/index.html",
                "<summary>2024</summary>",
                "<summary>2023</summary>",
            ],
        );
    }

    #[test]
    fn same_year_posts_share_one_section() {
        let entries = entries(&["a/p1/2024-01-01.md", "a/p2/2024-05-01.md"]);
        let nav = build_nav(&entries);
        assert_eq!(nav.matches("<summary>2024</summary>").count(), 1);
        assert_order(&nav, &["/a/p2/index.html", "/a/p1/index.html"]);
    }

    #[test]
    fn year_sections_most_recent_first() {
        let entries = entries(&[
            "a/p1/2022-03-01.md",
            "a/p2/2024-01-01.md",
            "a/p3/2023-07-15.md",
            "a/p4/2024-06-01.md",
        ]);
        let nav = build_nav(&entries);
        assert_order(
            &nav,
            &[
                "<summary>2024</summary>",
                "<summary>2023</summary>",
                "<summary>2022</summary>",
            ],
        );
        assert_eq!(nav.matches("<summary>2024</summary>").count(), 1);
    }

    #[test]
    fn pages_sorted_by_title_case_sensitive() {
        // Title case makes first letters uppercase; compare full titles.
        let entries = entries(&[
            "x/zebra/index.md",
            "x/apple/index.md",
            "x/mango/index.md",
        ]);
        let nav = build_nav(&entries);
        assert_order(&nav, &["Apple", "Mango", "Zebra"]);
    }

    #[test]
    fn pages_section_absent_without_pages() {
        let entries = entries(&["a/p1/2024-01-10.md"]);
        let nav = build_nav(&entries);
        assert!(!nav.contains("<summary>Pages</summary>"));
    }

    #[test]
    fn pages_section_precedes_all_year_sections() {
        let entries = entries(&["a/p1/2024-01-10.md", "z/about/index.md"]);
        let nav = build_nav(&entries);
        assert_order(&nav, &["<summary>Pages</summary>", "<summary>2024</summary>"]);
    }

    #[test]
    fn duplicate_group_paths_both_rendered() {
        let entries = entries(&["a/p1/2024-01-10.md", "a/p1/2024-02-20.md"]);
        let nav = build_nav(&entries);
        assert_eq!(nav.matches("/a/p1/index.html").count(), 2);
    }

    #[test]
    fn same_date_ties_keep_encounter_order() {
        let entries = entries(&["a/first/2024-01-10.md", "a/second/2024-01-10.md"]);
        let home = build_homepage_posts(&entries);
        assert_order(&home, &["First", "Second"]);
    }

    #[test]
    fn titles_are_escaped() {
        let entries = entries(&["a/tips-&-tricks/index.md"]);
        let nav = build_nav(&entries);
        assert!(nav.contains("Tips &amp; Tricks"));
    }

    #[test]
    fn nav_idempotent_for_same_input() {
        let entries = entries(&[
            "a/p1/2024-01-10.md",
            "b/p2/index.md",
            "a/p3/2023-12-05.md",
        ]);
        assert_eq!(build_nav(&entries), build_nav(&entries));
        assert_eq!(build_homepage_posts(&entries), build_homepage_posts(&entries));
    }
}
