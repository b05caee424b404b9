//! Approximate mention counting over the page text map.
//!
//! A reference is an instance where the person is mentioned in the book's
//! body text: their first name, last name, full name, or nickname.
//! Counting references rather than indexed pages gives more granularity
//! when ranking relative influence.
//!
//! NOTE: the matching is inexact and produces both false positives (a last
//! name shared by two people counts toward both) and false negatives
//! (spelling variants match nothing). The totals still give a good
//! indication of influence.

use regex::Regex;

use crate::types::{Entity, Name, PageTextMap};

/// Compiled literal patterns for one person's name forms.
struct NamePatterns {
    /// Nickname when the person has one, first name otherwise.
    given: Regex,
    /// Last name alone.
    last: Regex,
    /// `{given} {last}`, the full form both single patterns also hit.
    full: Regex,
}

fn literal(pattern: &str) -> Regex {
    Regex::new(&regex::escape(pattern)).expect("escaped literal regex")
}

impl NamePatterns {
    /// `None` when the name is too degenerate to search for.
    fn from_name(name: &Name) -> Option<Self> {
        let given = name.nickname.as_deref().unwrap_or(&name.first);
        if given.is_empty() || name.last.is_empty() {
            return None;
        }
        Some(NamePatterns {
            given: literal(given),
            last: literal(&name.last),
            full: literal(&format!("{} {}", given, name.last)),
        })
    }

    /// Mentions on one page: `given + last − full`. The subtraction undoes
    /// the double count where the full phrase matched both single patterns.
    fn count_on_page(&self, text: &str) -> usize {
        let given = self.given.find_iter(text).count();
        let last = self.last.find_iter(text).count();
        let full = self.full.find_iter(text).count();
        (given + last).saturating_sub(full)
    }
}

/// Fill in `references` for every entity: the sum of per-page mention
/// counts over the entity's indexed pages, plus one per footnote.
///
/// The per-page sums are independent, so page iteration order never
/// affects the total. Pages missing from the map contribute nothing.
pub fn count_references(entities: &mut [Entity], page_map: &PageTextMap) {
    for entity in entities.iter_mut() {
        let Some(patterns) = NamePatterns::from_name(&entity.name) else {
            entity.references = Some(entity.notes.len());
            continue;
        };

        let page_mentions: usize = entity
            .pages
            .iter()
            .filter_map(|page| page_map.get(page))
            .map(|text| patterns.count_on_page(text))
            .sum();

        entity.references = Some(page_mentions + entity.notes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(first: &str, last: &str, nickname: Option<&str>) -> Name {
        Name {
            first: first.to_string(),
            last: last.to_string(),
            nickname: nickname.map(str::to_string),
            suffix: None,
        }
    }

    fn entity(name: Name, pages: Vec<u32>, notes: Vec<&str>) -> Entity {
        Entity {
            value: format!("{}, {}", name.last, name.first),
            name,
            pages,
            notes: notes.into_iter().map(str::to_string).collect(),
            references: None,
        }
    }

    fn page_map(pages: &[(u32, &str)]) -> PageTextMap {
        pages
            .iter()
            .map(|(n, text)| (*n, text.to_string()))
            .collect()
    }

    #[test]
    fn test_full_name_counted_once() {
        // "Miles Davis" hits the given and last patterns once each; the
        // full-form subtraction brings the page down to a single mention.
        let map = page_map(&[(12, "Miles Davis opened the set.")]);
        let mut entities = vec![entity(name("Miles", "Davis", None), vec![12], vec![])];
        count_references(&mut entities, &map);
        assert_eq!(entities[0].references, Some(1));
    }

    #[test]
    fn test_separate_mentions_accumulate() {
        let map = page_map(&[(
            12,
            "Miles Davis led the band. Davis later said Miles Ahead was pivotal.",
        )]);
        let mut entities = vec![entity(name("Miles", "Davis", None), vec![12], vec![])];
        count_references(&mut entities, &map);
        // given "Miles" ×2, last "Davis" ×2, full "Miles Davis" ×1 → 3
        assert_eq!(entities[0].references, Some(3));
    }

    #[test]
    fn test_nickname_replaces_first_name() {
        let map = page_map(&[(34, "Shorty Baker took the solo; Shorty smiled.")]);
        let mut entities = vec![entity(
            name("Harold", "Baker", Some("Shorty")),
            vec![34],
            vec![],
        )];
        count_references(&mut entities, &map);
        // given "Shorty" ×2, last "Baker" ×1, full "Shorty Baker" ×1 → 2.
        // "Harold" appears nowhere and is not searched for.
        assert_eq!(entities[0].references, Some(2));
    }

    #[test]
    fn test_notes_add_to_the_total() {
        let map = page_map(&[(12, "Miles Davis."), (15, "Davis again.")]);
        let mut entities = vec![entity(
            name("Miles", "Davis", None),
            vec![12, 15],
            vec!["450n", "460n"],
        )];
        count_references(&mut entities, &map);
        assert_eq!(entities[0].references, Some(1 + 1 + 2));
    }

    #[test]
    fn test_missing_page_contributes_nothing() {
        let map = page_map(&[(12, "Miles Davis.")]);
        let mut entities = vec![entity(name("Miles", "Davis", None), vec![12, 999], vec![])];
        count_references(&mut entities, &map);
        assert_eq!(entities[0].references, Some(1));
    }

    #[test]
    fn test_page_order_is_irrelevant() {
        let map = page_map(&[
            (12, "Miles Davis and Davis."),
            (15, "Miles, alone."),
            (20, "Davis, Davis, Miles Davis."),
        ]);

        let forward = vec![12, 15, 20];
        let backward = vec![20, 15, 12];

        let mut a = vec![entity(name("Miles", "Davis", None), forward, vec![])];
        let mut b = vec![entity(name("Miles", "Davis", None), backward, vec![])];
        count_references(&mut a, &map);
        count_references(&mut b, &map);
        assert_eq!(a[0].references, b[0].references);
    }

    #[test]
    fn test_degenerate_name_counts_only_notes() {
        let map = page_map(&[(5, "anything at all")]);
        let mut entities = vec![entity(name("", "", None), vec![5], vec!["450n"])];
        count_references(&mut entities, &map);
        assert_eq!(entities[0].references, Some(1));
    }
}
