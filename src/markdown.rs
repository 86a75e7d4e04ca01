//! Markdown rendering adapter.
//!
//! Wraps pulldown-cmark behind one pure function, [`render_markdown`]. The
//! rest of the system treats markdown conversion as an opaque collaborator:
//! bytes in, HTML out, no filesystem access, no shared state.
//!
//! On top of the parser's common extensions (tables, footnotes,
//! strikethrough, task lists) the adapter post-processes the event stream:
//!
//! - headings get automatic `id` attributes (slugified text, uniquified with
//!   a numeric suffix on collisions);
//! - a table of contents is emitted before the body whenever the document
//!   has at least one heading;
//! - images are rewritten with `loading="lazy"`;
//! - absolute (`http`/`https`) links open in a new tab with
//!   `rel="noopener"`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;

struct Heading {
    level: usize,
    text: String,
    slug: String,
}

/// Convert markdown to HTML.
pub fn render_markdown(md: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let events: Vec<Event> = Parser::new_ext(md, options).collect();
    let headings = collect_headings(&events);

    let mut out_events: Vec<Event> = Vec::with_capacity(events.len());
    let mut heading_idx = 0;
    let mut in_external_link = false;

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { level, classes, attrs, .. }) => {
                // Rewritten starts pair 1:1 with collected headings.
                let slug = headings[heading_idx].slug.clone();
                heading_idx += 1;
                out_events.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(slug.into()),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
            }
            Event::Start(Tag::Image { dest_url, title, .. }) => {
                // Swallow the inner events; their text becomes the alt.
                let mut alt = String::new();
                i += 1;
                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::Image) => break,
                        Event::Text(t) | Event::Code(t) => alt.push_str(t),
                        _ => {}
                    }
                    i += 1;
                }
                let url: &str = dest_url;
                out_events.push(Event::InlineHtml(
                    format!(
                        "<img src=\"{}\" alt=\"{}\"{} loading=\"lazy\" />",
                        encode_double_quoted_attribute(url),
                        encode_double_quoted_attribute(alt.as_str()),
                        title_attr(title),
                    )
                    .into(),
                ));
            }
            Event::Start(Tag::Link { dest_url, title, .. }) if is_external(dest_url) => {
                in_external_link = true;
                let url: &str = dest_url;
                out_events.push(Event::InlineHtml(
                    format!(
                        "<a href=\"{}\"{} target=\"_blank\" rel=\"noopener\">",
                        encode_double_quoted_attribute(url),
                        title_attr(title),
                    )
                    .into(),
                ));
            }
            Event::End(TagEnd::Link) if in_external_link => {
                in_external_link = false;
                out_events.push(Event::InlineHtml("</a>".into()));
            }
            event => out_events.push(event.clone()),
        }
        i += 1;
    }

    let mut body = String::new();
    html::push_html(&mut body, out_events.into_iter());

    if headings.is_empty() {
        body
    } else {
        format!("{}{}", toc_html(&headings), body)
    }
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("http://") || dest.starts_with("https://")
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", encode_double_quoted_attribute(title))
    }
}

/// Gather heading text in document order and assign unique slugs.
fn collect_headings(events: &[Event]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(usize, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((*level as usize, String::new()));
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(t);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let base = slugify(&text);
                    let count = seen.entry(base.clone()).or_insert(0);
                    let slug = if *count == 0 {
                        base.clone()
                    } else {
                        format!("{base}-{count}")
                    };
                    *count += 1;
                    headings.push(Heading { level, text, slug });
                }
            }
            _ => {}
        }
    }

    headings
}

/// Lowercase, keep alphanumerics, collapse everything else to single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn toc_html(headings: &[Heading]) -> String {
    let mut out = String::from("<nav class=\"toc\">\n<ul>\n");
    for h in headings {
        out.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            h.level,
            h.slug,
            encode_text(&h.text),
        ));
    }
    out.push_str("</ul>\n</nav>\n");
    out
}
