mod entry;
mod index;
mod markup;
mod mentions;
mod refs;
mod scanner;
mod types;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use types::{
    BookConfig, DEFAULT_CHAPTER_COUNT, DEFAULT_EXCLUSION, DEFAULT_PAGE_COUNT, Entity, PageTextMap,
};

const OUTPUT_DIR: &str = "output";
const INDEX_FILE: &str = "index.json";
const PAGE_MAP_FILE: &str = "page_map.json";

#[derive(Parser)]
#[command(
    name = "index_extract",
    about = "Book back-matter index → mention-frequency dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Total body pages; reference numbers above this are footnotes
    #[arg(long, default_value_t = DEFAULT_PAGE_COUNT)]
    book_length: u32,
    /// Number of body chapter documents (ch01..chNN)
    #[arg(long, default_value_t = DEFAULT_CHAPTER_COUNT)]
    chapters: u32,
    /// Non-person index values to drop, matched by substring (repeatable)
    #[arg(long, default_values_t = [DEFAULT_EXCLUSION.to_string()])]
    exclude: Vec<String>,
}

impl ConfigArgs {
    fn to_config(&self) -> BookConfig {
        BookConfig {
            page_count: self.book_length,
            chapter_count: self.chapters,
            exclusions: self.exclude.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Parse the back-matter index → output/index.json
    Index {
        /// Path to the unpacked EPUB directory
        #[arg(default_value = ".")]
        book: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Build the page-number → text map → output/page_map.json
    Pages {
        /// Path to the unpacked EPUB directory
        #[arg(default_value = ".")]
        book: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Count mentions per person, filling `references` in output/index.json
    References,
    /// Print the most-referenced people from the finished dataset
    Top {
        /// How many people to show
        #[arg(default_value_t = 20)]
        count: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Index { book, config }) => run_index(&book, &config.to_config()),
        Some(Command::Pages { book, config }) => run_pages(&book, &config.to_config()),
        Some(Command::References) => run_references(),
        Some(Command::Top { count }) => run_top(count),
        // Default: full pipeline over the current directory
        None => {
            let book = Path::new(".");
            let config = BookConfig::default();
            run_pages(book, &config);
            run_index(book, &config);
            run_references();
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    std::fs::create_dir_all(OUTPUT_DIR)
        .unwrap_or_else(|e| panic!("cannot create {OUTPUT_DIR}/: {e}"));
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

fn read_json<T: serde::de::DeserializeOwned>(name: &str, regenerate: &str) -> T {
    let path = output_path(name);
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        eprintln!("Run `index_extract {regenerate}` first to generate it.");
        std::process::exit(1);
    });
    serde_json::from_str(&json).unwrap_or_else(|e| {
        eprintln!("Cannot parse {}: {e}", path.display());
        eprintln!("The JSON may be from an older format. Re-run `index_extract {regenerate}`.");
        std::process::exit(1);
    })
}

fn read_document(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        std::process::exit(1);
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  INDEX MODE: back-matter index → entity list
// ═══════════════════════════════════════════════════════════════════════

fn run_index(book: &Path, config: &BookConfig) {
    eprintln!("Scanning book at: {}", book.display());
    let files = scanner::scan_book(book);

    let Some(index_doc) = files.index else {
        eprintln!("No index document found under {}", book.display());
        std::process::exit(1);
    };
    eprintln!("Index document: {}", index_doc.display());

    let document = read_document(&index_doc);
    let entries = markup::parse_index_entries(&document);
    eprintln!("Found {} raw index entries", entries.len());

    let (entities, skips) = index::build_index(&entries, config);

    eprintln!("\n══════════════════════════════════════════");
    eprintln!("  INDEX STATISTICS");
    eprintln!("══════════════════════════════════════════");
    eprintln!("\nKept {} people", entities.len());
    eprintln!("Skipped:");
    eprintln!("  sub-entries (folded into parents): {}", skips.sub_entries);
    eprintln!("  no page references:                {}", skips.no_references);
    eprintln!("  not name-shaped:                   {}", skips.not_a_name);
    eprintln!("  quoted work titles:                {}", skips.quoted_title);
    eprintln!("  venues:                            {}", skips.venue);
    eprintln!("  excluded values:                   {}", skips.excluded);
    eprintln!("  fewer than 2 unique pages:         {}", skips.below_page_minimum);
    eprintln!();

    write_json(INDEX_FILE, &entities);
}

// ═══════════════════════════════════════════════════════════════════════
//  PAGES MODE: chapter documents → page-number → text map
// ═══════════════════════════════════════════════════════════════════════

fn run_pages(book: &Path, config: &BookConfig) {
    eprintln!("Scanning book at: {}", book.display());
    let files = scanner::scan_book(book);

    if files.chapters.is_empty() {
        eprintln!("No chapter documents found under {}", book.display());
        std::process::exit(1);
    }
    if (files.chapters.len() as u32) != config.chapter_count {
        eprintln!(
            "Warning: found {} chapter documents, expected {}",
            files.chapters.len(),
            config.chapter_count
        );
    }

    // Every chapter folds into the map before anything is written; the
    // write happens only after the last chapter has been read.
    let mut map = PageTextMap::new();
    for chapter in &files.chapters {
        let content = read_document(&chapter.path);
        let before = map.len();
        markup::collect_chapter_pages(&content, &mut map);
        eprintln!("  ch{:02}: {} pages", chapter.number, map.len() - before);
    }

    eprintln!("\nMapped {} pages total", map.len());
    write_json(PAGE_MAP_FILE, &map);
}

// ═══════════════════════════════════════════════════════════════════════
//  REFERENCES MODE: count mentions over the indexed pages
// ═══════════════════════════════════════════════════════════════════════

fn run_references() {
    let mut entities: Vec<Entity> = read_json(INDEX_FILE, "index <BOOK_DIR>");
    let page_map: PageTextMap = read_json(PAGE_MAP_FILE, "pages <BOOK_DIR>");

    mentions::count_references(&mut entities, &page_map);

    let total: usize = entities.iter().filter_map(|e| e.references).sum();
    eprintln!(
        "Counted {} mentions across {} people",
        total,
        entities.len()
    );

    write_json(INDEX_FILE, &entities);
}

// ═══════════════════════════════════════════════════════════════════════
//  TOP MODE: print the ranked dataset
// ═══════════════════════════════════════════════════════════════════════

fn run_top(count: usize) {
    let entities: Vec<Entity> = read_json(INDEX_FILE, "references");

    if entities.iter().all(|e| e.references.is_none()) {
        eprintln!("No reference counts yet. Run `index_extract references` first.");
        std::process::exit(1);
    }

    let mut ranked: Vec<&Entity> = entities.iter().collect();
    ranked.sort_by_key(|e| std::cmp::Reverse(e.references.unwrap_or(0)));

    for (rank, e) in ranked.iter().take(count).enumerate() {
        println!(
            "{:>3}. {:<40} {:>5} references  ({} pages, {} notes)",
            rank + 1,
            e.value,
            e.references.unwrap_or(0),
            e.pages.len(),
            e.notes.len()
        );
    }
}
