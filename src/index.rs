//! Building the entity list from the ordered index entry sequence.

use crate::entry::{parse_name, split_entry};
use crate::refs::collect_references;
use crate::types::{BookConfig, Entity, EntryKind, RawEntry};

/// Why entries were passed over, for the run report. Disqualification is
/// silent and final: an entry either fully qualifies or leaves no trace in
/// the output.
#[derive(Debug, Default)]
pub struct SkipStats {
    pub sub_entries: usize,
    pub no_references: usize,
    pub not_a_name: usize,
    pub quoted_title: usize,
    pub venue: usize,
    pub excluded: usize,
    pub below_page_minimum: usize,
}

/// One pass over the raw entries, producing one entity per qualifying
/// person. Sub-entries are folded into the preceding main entry via
/// lookahead and never processed on their own.
pub fn build_index(entries: &[RawEntry], cfg: &BookConfig) -> (Vec<Entity>, SkipStats) {
    let mut out = Vec::new();
    let mut stats = SkipStats::default();

    for (idx, entry) in entries.iter().enumerate() {
        // Sub-entries are only reachable through their parent's lookahead.
        if entry.kind == EntryKind::Sub {
            stats.sub_entries += 1;
            continue;
        }

        let Some(split) = split_entry(&entry.text) else {
            stats.no_references += 1;
            continue;
        };

        // Personal names have at least one comma from the "Last, First"
        // form, occasionally more, e.g. "Connick, Harry, Jr.". Anything
        // with less isn't referring to a person.
        if split.value.matches(',').count() < 1 {
            stats.not_a_name += 1;
            continue;
        }

        // Values that open with a quote are song/work titles.
        if split.value.starts_with('“') {
            stats.quoted_title += 1;
            continue;
        }

        let name = parse_name(&split.value);

        // Venues index as "Vanguard, The" and misparse as person names.
        if name.first.eq_ignore_ascii_case("the") {
            stats.venue += 1;
            continue;
        }

        if cfg
            .exclusions
            .iter()
            .any(|needle| split.value.contains(needle.as_str()))
        {
            stats.excluded += 1;
            continue;
        }

        let mut pages = Vec::new();
        let mut notes = Vec::new();
        collect_references(&split.refs, cfg, &mut pages, &mut notes);

        // Fold every immediately-following sub-entry into this entity.
        let mut next = idx + 1;
        while let Some(sub) = entries.get(next) {
            if sub.kind != EntryKind::Sub {
                break;
            }
            if let Some(sub_split) = split_entry(&sub.text) {
                collect_references(&sub_split.refs, cfg, &mut pages, &mut notes);
            }
            next += 1;
        }

        pages.sort_unstable();
        pages.dedup();
        notes.sort();
        notes.dedup();

        // Fewer than two distinct pages, even counting sub-entries, isn't
        // prominent enough to keep.
        if pages.len() < 2 {
            stats.below_page_minimum += 1;
            continue;
        }

        out.push(Entity {
            name,
            notes,
            pages,
            value: split.value,
            references: None,
        });
    }

    (out, stats)
}
