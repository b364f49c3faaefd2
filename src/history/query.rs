use crate::model::{CopyVariant, HistoryRecord};

/// A record restricted to its favorited variants.
#[derive(Debug)]
pub struct FavoriteEntry<'a> {
    pub record: &'a HistoryRecord,
    pub favorites: Vec<&'a CopyVariant>,
}

/// Records with at least one favorite, filtered by `term` against the topic,
/// product name and the favorite variants themselves.
pub fn favorites<'a>(records: &'a [HistoryRecord], term: Option<&str>) -> Vec<FavoriteEntry<'a>> {
    let needle = normalize_term(term);
    records
        .iter()
        .filter_map(|record| {
            let favorites: Vec<&CopyVariant> = record.favorites().collect();
            if favorites.is_empty() {
                return None;
            }
            let keep = match needle.as_deref() {
                None => true,
                Some(needle) => {
                    record.input().topic().to_lowercase().contains(needle)
                        || record.input().product_name().to_lowercase().contains(needle)
                        || favorites.iter().any(|copy| copy.matches(needle))
                }
            };
            keep.then_some(FavoriteEntry { record, favorites })
        })
        .collect()
}

pub fn search<'a>(records: &'a [HistoryRecord], term: &str) -> Vec<&'a HistoryRecord> {
    match normalize_term(Some(term)) {
        Some(needle) => records
            .iter()
            .filter(|record| record.matches(&needle))
            .collect(),
        None => records.iter().collect(),
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::input::sample_input;

    fn record_with(titles: &[&str], favorite: Option<usize>) -> HistoryRecord {
        let outputs = titles
            .iter()
            .map(|title| CopyVariant::new(*title, "body", Vec::new(), Vec::new()))
            .collect();
        let mut record = HistoryRecord::new(sample_input(), outputs).unwrap();
        if let Some(index) = favorite {
            let id = record.outputs()[index].id().to_string();
            record.toggle_favorite(&id);
        }
        record
    }

    #[test]
    fn favorites_only_lists_favorited_variants() {
        let records = vec![
            record_with(&["a", "b"], Some(1)),
            record_with(&["c"], None),
        ];
        let entries = favorites(&records, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].favorites.len(), 1);
        assert_eq!(entries[0].favorites[0].title, "b");
    }

    #[test]
    fn favorites_search_ignores_non_favorite_variants() {
        let records = vec![record_with(&["Morning Routine", "Evening Glow"], Some(0))];
        assert_eq!(favorites(&records, Some("MORNING")).len(), 1);
        assert!(favorites(&records, Some("evening")).is_empty());
        assert_eq!(favorites(&records, Some("防晒")).len(), 1);
        assert_eq!(favorites(&records, Some("  ")).len(), 1);
    }

    #[test]
    fn search_matches_any_variant() {
        let records = vec![
            record_with(&["Evening Glow"], None),
            record_with(&["Other"], None),
        ];
        let found = search(&records, "glow");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), records[0].id());
        assert_eq!(search(&records, "").len(), 2);
    }
}
