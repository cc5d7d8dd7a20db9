//! Station and line types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Opaque station identifier assigned by the backend.
///
/// Only compared and echoed back in search queries, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station with its French (primary) and Arabic (secondary) names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name_fr: String,
    pub name_ar: String,
}

impl Station {
    pub fn new(id: u64, name_fr: impl Into<String>, name_ar: impl Into<String>) -> Self {
        Self {
            id: StationId(id),
            name_fr: name_fr.into(),
            name_ar: name_ar.into(),
        }
    }

    /// The display name in the given language.
    pub fn name_in(&self, lang: Language) -> &str {
        match lang {
            Language::Fr => &self.name_fr,
            Language::Ar => &self.name_ar,
        }
    }
}

/// The ordered station list, loaded once at startup.
///
/// Order is the backend's order and is the order suggestions appear in.
#[derive(Debug, Clone, Default)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    /// An empty list, used until the startup fetch completes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Look up a station by id.
    pub fn find(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<Station> for StationList {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self {
            stations: iter.into_iter().collect(),
        }
    }
}

/// A rail line, shown in the static lines grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StationList {
        StationList::new(vec![
            Station::new(1, "Alger", "الجزائر"),
            Station::new(2, "Blida", "البليدة"),
        ])
    }

    #[test]
    fn find_by_id() {
        let list = sample();
        assert_eq!(list.find(StationId::new(2)).unwrap().name_fr, "Blida");
        assert!(list.find(StationId::new(9)).is_none());
    }

    #[test]
    fn name_in_language() {
        let list = sample();
        let alger = list.find(StationId::new(1)).unwrap();
        assert_eq!(alger.name_in(Language::Fr), "Alger");
        assert_eq!(alger.name_in(Language::Ar), "الجزائر");
    }

    #[test]
    fn empty_list() {
        let list = StationList::empty();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.find(StationId::new(1)).is_none());
    }

    #[test]
    fn id_deserializes_from_integer() {
        let s: Station =
            serde_json::from_str(r#"{"id": 7, "name_fr": "Oran", "name_ar": "وهران"}"#).unwrap();
        assert_eq!(s.id, StationId::new(7));
        assert_eq!(s.id.to_string(), "7");
    }
}
