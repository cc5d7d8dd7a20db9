//! Station autocomplete.
//!
//! Matching is a case-insensitive substring filter over both station
//! names, in station-list order. Each input field runs its match passes
//! through a trailing-edge `Debouncer`, so only the last keystroke of a
//! burst produces suggestions.

mod debounce;
mod field;

pub use debounce::Debouncer;
pub use field::{AutocompleteField, ClickTarget, FieldRole, MatchPass, Suggestion};

use crate::domain::{Station, StationList};

/// Stations whose French or Arabic name contains `query`, ignoring case.
///
/// A blank query matches nothing.
pub fn match_stations<'a>(stations: &'a StationList, query: &str) -> Vec<&'a Station> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    stations
        .iter()
        .filter(|s| {
            s.name_fr.to_lowercase().contains(&needle) || s.name_ar.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn stations() -> StationList {
        StationList::new(vec![
            Station::new(1, "Alger", "الجزائر"),
            Station::new(2, "Blida", "البليدة"),
            Station::new(3, "El Harrach", "الحراش"),
            Station::new(4, "Agha", "آغا"),
        ])
    }

    fn ids(matches: &[&Station]) -> Vec<StationId> {
        matches.iter().map(|s| s.id).collect()
    }

    fn expected(raw: &[u64]) -> Vec<StationId> {
        raw.iter().copied().map(StationId::new).collect()
    }

    #[test]
    fn matches_french_name_case_insensitively() {
        let list = stations();
        assert_eq!(ids(&match_stations(&list, "al")), expected(&[1]));
        assert_eq!(ids(&match_stations(&list, "AL")), expected(&[1]));
        assert_eq!(ids(&match_stations(&list, "harr")), expected(&[3]));
    }

    #[test]
    fn matches_arabic_name() {
        let list = stations();
        assert_eq!(ids(&match_stations(&list, "البليدة")), expected(&[2]));
        // "ال" prefixes three Arabic names
        assert_eq!(ids(&match_stations(&list, "ال")), expected(&[1, 2, 3]));
    }

    #[test]
    fn keeps_station_list_order() {
        let list = stations();
        assert_eq!(ids(&match_stations(&list, "a")), expected(&[1, 2, 3, 4]));
    }

    #[test]
    fn blank_query_matches_nothing() {
        let list = stations();
        assert!(match_stations(&list, "").is_empty());
        assert!(match_stations(&list, "   ").is_empty());
    }

    #[test]
    fn empty_station_list_matches_nothing() {
        assert!(match_stations(&StationList::empty(), "al").is_empty());
    }
}
