//! Normalizing raw reference tokens into page numbers and footnote markers.

use crate::types::BookConfig;

/// The leading decimal digits of a token.
fn digit_prefix(token: &str) -> &str {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    &token[..end]
}

/// Parse a token's leading digits, ignoring trailing text ("348.", "410n").
fn leading_number(token: &str) -> Option<u32> {
    digit_prefix(token).parse().ok()
}

/// Normalize a list of raw reference tokens, appending page numbers to
/// `pages` and footnote tokens to `notes`.
///
/// The collections are caller-owned so that a main entry and its
/// sub-entries can accumulate into one shared pair. Whether a token marks a
/// footnote is purely threshold-based: no body page number can exceed the
/// book's page count.
pub fn collect_references(
    refs: &[String],
    cfg: &BookConfig,
    pages: &mut Vec<u32>,
    notes: &mut Vec<String>,
) {
    for token in refs {
        // A range of pages, e.g. "346–48". Expand to individual pages.
        if token.contains('–') {
            expand_range(token, pages);
            continue;
        }

        match leading_number(token) {
            Some(n) if n > cfg.page_count => notes.push(token.clone()),
            Some(n) => pages.push(n),
            // No digits at all: not a usable reference.
            None => {}
        }
    }
}

/// Expand an en-dash range token into individual pages, inclusive.
///
/// Upper bounds are printed in truncated form ("346–48", "207–9"): when the
/// numeric max falls below the min, rebuild the real max by prepending the
/// min's extra leading digits. That step is digit-string concatenation, not
/// arithmetic: "346" contributes "3", turning "48" into "348".
fn expand_range(token: &str, pages: &mut Vec<u32>) {
    let Some((min_raw, max_raw)) = token.split_once('–') else {
        return;
    };

    let min_digits = digit_prefix(min_raw);
    let max_digits = digit_prefix(max_raw);

    let (Ok(min), Ok(mut max)) = (min_digits.parse::<u32>(), max_digits.parse::<u32>()) else {
        return;
    };

    if max < min && max_digits.len() < min_digits.len() {
        let prefix = &min_digits[..min_digits.len() - max_digits.len()];
        if let Ok(rebuilt) = format!("{prefix}{max_digits}").parse() {
            max = rebuilt;
        }
    }

    for page in min..=max {
        pages.push(page);
    }
}
