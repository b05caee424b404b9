use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// The documents discovered for one unpacked book.
#[derive(Debug, Default)]
pub struct BookFiles {
    /// Body chapter documents, ordered by chapter number.
    pub chapters: Vec<ChapterFile>,
    /// The back-matter index document.
    pub index: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ChapterFile {
    pub number: u32,
    pub path: PathBuf,
}

/// Extensions that can hold the book's markup documents.
const MARKUP_EXTENSIONS: &[&str] = &["xhtml", "html", "htm", "xml"];

/// Scan an unpacked EPUB directory for the body chapters ("ch01", "ch02",
/// …) and the back-matter index document (stem containing "index").
///
/// EPUBs nest their content under OEBPS/ or similar, so the walk descends
/// a few levels rather than reading a single directory.
pub fn scan_book(root: &Path) -> BookFiles {
    let mut found = BookFiles::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !MARKUP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            continue;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(number) = chapter_number(stem) {
            found.chapters.push(ChapterFile {
                number,
                path: path.to_path_buf(),
            });
        } else if stem.to_ascii_lowercase().contains("index") {
            found.index = Some(path.to_path_buf());
        }
    }

    found.chapters.sort_by_key(|c| c.number);
    found
}

/// Parse "ch01"/"ch12" style stems into a chapter number.
fn chapter_number(stem: &str) -> Option<u32> {
    let digits = stem.strip_prefix("ch")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
