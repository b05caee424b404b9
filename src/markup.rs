//! Reading the book's XHTML documents: index paragraphs and page text.
//!
//! Deliberately not a full XML stack. The index is a flat sequence of `<p>`
//! elements and the chapters mark page breaks with empty anchors, so a pair
//! of regexes and a marker split cover everything the pipeline needs.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{EntryKind, PageTextMap, RawEntry};

// ── Index entries ──────────────────────────────────────────────────

/// One `<p …>…</p>` element, attributes and inner markup captured.
static RE_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p\b(?P<attrs>[^>]*)>(?P<body>.*?)</p>").unwrap());

/// The class attribute inside a tag's attribute list.
static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="(?P<class>[^"]*)""#).unwrap());

/// Any tag, for stripping nested markup out of text content.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Paragraph class marking a sub-entry; every other paragraph in the index
/// document is a main entry.
const SUB_ENTRY_CLASS: &str = "indexsub";

/// Collapse an element body to plain text: strip nested tags, decode the
/// few entities book indexes actually use.
fn inner_text(body: &str) -> String {
    RE_TAG
        .replace_all(body, "")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#8217;", "’")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Extract the ordered sequence of raw index entries from the index
/// document's markup.
pub fn parse_index_entries(document: &str) -> Vec<RawEntry> {
    RE_PARAGRAPH
        .captures_iter(document)
        .map(|caps| {
            let attrs = caps.name("attrs").map(|m| m.as_str()).unwrap_or("");
            let class = RE_CLASS
                .captures(attrs)
                .and_then(|c| c.name("class"))
                .map(|m| m.as_str());
            let kind = if class == Some(SUB_ENTRY_CLASS) {
                EntryKind::Sub
            } else {
                EntryKind::Main
            };
            let text = caps
                .name("body")
                .map(|m| inner_text(m.as_str()))
                .unwrap_or_default();
            RawEntry { kind, text }
        })
        .collect()
}

// ── Page map ───────────────────────────────────────────────────────

/// Marker the chapter documents place ahead of each page's content:
/// `<a id="page_123"/>`.
const PAGE_ANCHOR: &str = "id=\"page_";

/// Split one chapter document into (page number, page text) pairs and fold
/// them into `map`.
///
/// Chunks that don't open with a digit are the text before the chapter's
/// first anchor and are dropped.
pub fn collect_chapter_pages(document: &str, map: &mut PageTextMap) {
    for chunk in document.split(PAGE_ANCHOR) {
        if !chunk.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let Some((number, content)) = chunk.split_once("\"/>") else {
            continue;
        };
        let Ok(page) = number.parse::<u32>() else {
            continue;
        };
        // The split cuts the next page's anchor mid-tag, leaving a dangling
        // "<a " at the tail; drop it before stripping markup.
        let content = match content.rfind('<') {
            Some(i) if !content[i..].contains('>') => &content[..i],
            _ => content,
        };
        map.insert(page, inner_text(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_index_entries ──────────────────────────────────────────

    #[test]
    fn test_entries_in_document_order_with_kinds() {
        let doc = r#"<html><body>
            <p class="indexmain">Davis, Miles, 12, 15</p>
            <p class="indexsub">and modal jazz, 40</p>
            <p class="indexmain">Ellington, Duke, 7, 9</p>
        </body></html>"#;

        let entries = parse_index_entries(doc);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Main);
        assert_eq!(entries[0].text, "Davis, Miles, 12, 15");
        assert_eq!(entries[1].kind, EntryKind::Sub);
        assert_eq!(entries[1].text, "and modal jazz, 40");
        assert_eq!(entries[2].kind, EntryKind::Main);
    }

    #[test]
    fn test_paragraph_without_class_is_a_main_entry() {
        let entries = parse_index_entries("<p>Davis, Miles, 12</p>");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Main);
    }

    #[test]
    fn test_nested_markup_stripped_and_entities_decoded() {
        let entries =
            parse_index_entries(r#"<p class="indexmain"><i>Basie</i>, Count &amp; band, 3, 4</p>"#);
        assert_eq!(entries[0].text, "Basie, Count & band, 3, 4");
    }

    #[test]
    fn test_no_paragraphs_yields_no_entries() {
        assert!(parse_index_entries("<html><body></body></html>").is_empty());
    }

    // ── collect_chapter_pages ────────────────────────────────────────

    #[test]
    fn test_pages_split_on_anchors() {
        let doc = concat!(
            "<h1>Chapter one</h1>",
            "<a id=\"page_12\"/>Miles Davis opened the set.",
            "<a id=\"page_13\"/>The band followed."
        );

        let mut map = PageTextMap::new();
        collect_chapter_pages(doc, &mut map);

        assert_eq!(map.len(), 2);
        assert_eq!(map[&12], "Miles Davis opened the set.");
        assert_eq!(map[&13], "The band followed.");
    }

    #[test]
    fn test_text_before_first_anchor_dropped() {
        let mut map = PageTextMap::new();
        collect_chapter_pages("front matter with no anchor", &mut map);
        assert!(map.is_empty());
    }

    #[test]
    fn test_page_text_has_tags_stripped() {
        let mut map = PageTextMap::new();
        collect_chapter_pages(
            "<a id=\"page_5\"/><p>Miles <i>Davis</i> again.</p>",
            &mut map,
        );
        assert_eq!(map[&5], "Miles Davis again.");
    }

    #[test]
    fn test_chapters_fold_into_one_map() {
        let mut map = PageTextMap::new();
        collect_chapter_pages("<a id=\"page_2\"/>two", &mut map);
        collect_chapter_pages("<a id=\"page_1\"/>one", &mut map);
        let pages: Vec<u32> = map.keys().copied().collect();
        assert_eq!(pages, vec![1, 2]);
    }
}
