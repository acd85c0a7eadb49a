use std::collections::HashMap;

use crate::entry::{EnergySource, EntryStore};

/// Radio-group source selection: exactly one value is selected at all
/// times, `All` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Only(EnergySource),
}

impl SourceFilter {
    pub fn matches(self, category_code: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(source) => category_code == source.code(),
        }
    }
}

/// The live filter inputs. Mutated on every keystroke and radio change;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub query: String,
    pub source: SourceFilter,
}

/// Recompute the full visibility set for the current filter state.
///
/// An entry is visible iff its name contains the query as a
/// case-insensitive substring and its source category passes the radio
/// filter. The empty query matches every name. Recomputed synchronously per
/// input event; entry counts are bounded by page content, so there is no
/// debouncing.
pub fn apply_filter(state: &FilterState, entries: &EntryStore) -> HashMap<String, bool> {
    let query = state.query.to_lowercase();
    entries
        .iter()
        .map(|entry| {
            let visible =
                entry.name.to_lowercase().contains(&query) && state.source.matches(&entry.source);
            (entry.id.clone(), visible)
        })
        .collect()
}

pub fn visible_count(visibility: &HashMap<String, bool>) -> usize {
    visibility.values().filter(|visible| **visible).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::geo::Coordinate;

    fn entry(id: &str, name: &str, source: &str, lat: f64, lon: f64) -> Entry {
        Entry {
            id: id.to_string(),
            name: name.to_string(),
            source: source.to_string(),
            capacity_mw: None,
            coordinate: Coordinate::new(lat, lon),
        }
    }

    fn sample_store() -> EntryStore {
        EntryStore::new(vec![
            entry("p1", "Plant Alpha", "SUN", 10.0, 20.0),
            entry("p2", "Plant Beta", "WND", 10.001, 20.001),
        ])
    }

    #[test]
    fn query_matches_case_insensitively() {
        let state = FilterState {
            query: "alpha".to_string(),
            source: SourceFilter::All,
        };
        let visibility = apply_filter(&state, &sample_store());
        assert_eq!(visibility["p1"], true);
        assert_eq!(visibility["p2"], false);
        assert_eq!(visible_count(&visibility), 1);
    }

    #[test]
    fn empty_query_and_all_sources_shows_everything() {
        let visibility = apply_filter(&FilterState::default(), &sample_store());
        assert_eq!(visible_count(&visibility), 2);
    }

    #[test]
    fn source_filter_intersects_with_query() {
        let state = FilterState {
            query: "plant".to_string(),
            source: SourceFilter::Only(EnergySource::Wind),
        };
        let visibility = apply_filter(&state, &sample_store());
        assert_eq!(visibility["p1"], false);
        assert_eq!(visibility["p2"], true);
    }

    #[test]
    fn source_filter_alone_hides_other_categories() {
        let state = FilterState {
            query: String::new(),
            source: SourceFilter::Only(EnergySource::Solar),
        };
        let visibility = apply_filter(&state, &sample_store());
        assert_eq!(visibility["p1"], true);
        assert_eq!(visibility["p2"], false);
    }

    #[test]
    fn unknown_category_code_only_matches_all() {
        let store = EntryStore::new(vec![entry("g1", "The Geysers", "GEO", 38.8, -122.8)]);
        let all = apply_filter(&FilterState::default(), &store);
        assert_eq!(all["g1"], true);

        let solar_only = apply_filter(
            &FilterState {
                query: String::new(),
                source: SourceFilter::Only(EnergySource::Solar),
            },
            &store,
        );
        assert_eq!(solar_only["g1"], false);
    }

    #[test]
    fn no_match_yields_zero_visible() {
        let state = FilterState {
            query: "does-not-exist".to_string(),
            source: SourceFilter::All,
        };
        let visibility = apply_filter(&state, &sample_store());
        assert_eq!(visible_count(&visibility), 0);
    }

    #[test]
    fn empty_store_yields_zero_visible_for_any_query() {
        let state = FilterState {
            query: "anything".to_string(),
            source: SourceFilter::All,
        };
        let visibility = apply_filter(&state, &EntryStore::default());
        assert!(visibility.is_empty());
        assert_eq!(visible_count(&visibility), 0);
    }

    #[test]
    fn apply_filter_is_idempotent() {
        let state = FilterState {
            query: "beta".to_string(),
            source: SourceFilter::Only(EnergySource::Wind),
        };
        let store = sample_store();
        assert_eq!(apply_filter(&state, &store), apply_filter(&state, &store));
    }
}
