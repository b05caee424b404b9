//! Splitting raw index entries into a name value and reference tokens.

use crate::types::Name;

/// A raw entry separated into its name prefix and reference tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitEntry {
    pub value: String,
    pub refs: Vec<String>,
}

/// Separate an entry's text into the value prefix and the trailing page
/// reference list. The reference list starts at the first digit; entries
/// with no digit anywhere aren't referenced on any page and yield `None`.
pub fn split_entry(text: &str) -> Option<SplitEntry> {
    let refs_start = text.find(|c: char| c.is_ascii_digit())?;

    let mut value = text[..refs_start].trim().to_string();

    // Remove the trailing comma. When the name carries a quoted nickname,
    // e.g. `Baker, Harold “Shorty,”`, that comma isn't the last character,
    // so drop the last comma wherever it sits and keep the rest intact.
    if let Some(i) = value.rfind(',') {
        value.remove(i);
    }

    let refs = text[refs_start..].split(", ").map(str::to_string).collect();

    Some(SplitEntry { value, refs })
}

/// Break a cleaned value string into name parts.
///
/// Values have the shape `Last, First [“Nickname”][, Suffix]`. Malformed
/// input degrades to empty or missing parts; no validation happens here.
pub fn parse_name(value: &str) -> Name {
    let mut parts = value.splitn(3, ", ");
    let last = parts.next().unwrap_or_default().to_string();
    let name_and_nickname = parts.next().unwrap_or_default();
    let suffix = parts.next().map(str::to_string);

    let (first, nickname) = match name_and_nickname.split_once(" “") {
        Some((first, nickname)) => (
            first.to_string(),
            Some(nickname.trim_end_matches('”').to_string()),
        ),
        None => (name_and_nickname.to_string(), None),
    };

    Name {
        first,
        last,
        nickname,
        suffix,
    }
}
