use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Raw index markup entries ───────────────────────────────────────

/// Classification carried by an index paragraph's `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Top-level entry: `Davis, Miles, 12, 346–48, 410n`
    Main,
    /// Continuation entry nested under the preceding main entry,
    /// contributing additional pages to the same person.
    Sub,
}

/// One index paragraph before any classification or filtering.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub kind: EntryKind,
    pub text: String,
}

// ── Structured name ────────────────────────────────────────────────

/// Name parts extracted from an index value string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
    /// Quoted nickname, e.g. the "Shorty" in `Baker, Harold “Shorty”`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Generational suffix, e.g. the "Jr." in `Connick, Harry, Jr.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

// ── An indexed person ──────────────────────────────────────────────

/// An indexed person with aggregated page and footnote references.
/// `pages` and `notes` are ascending and contain no duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: Name,
    pub notes: Vec<String>,
    pub pages: Vec<u32>,
    /// The cleaned display string the entity was parsed from.
    pub value: String,
    /// Approximate mention count, filled in by the references pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<usize>,
}

/// Page number → page text, covering every page an entity may reference.
pub type PageTextMap = BTreeMap<u32, String>;

// ── Per-book configuration ─────────────────────────────────────────

pub const DEFAULT_PAGE_COUNT: u32 = 444;
pub const DEFAULT_CHAPTER_COUNT: u32 = 10;
pub const DEFAULT_EXCLUSION: &str = "Africanization";

/// Fixed facts about the source book. The defaults describe the book the
/// original dataset was built from; override them per document via the CLI.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Total body pages; reference numbers above this point at footnotes.
    pub page_count: u32,
    /// Number of body chapter documents (ch01..chNN).
    pub chapter_count: u32,
    /// Known non-person index values, matched by substring.
    pub exclusions: Vec<String>,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            page_count: DEFAULT_PAGE_COUNT,
            chapter_count: DEFAULT_CHAPTER_COUNT,
            exclusions: vec![DEFAULT_EXCLUSION.to_string()],
        }
    }
}
