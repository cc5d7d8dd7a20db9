//! Per-itinerary view models.

use crate::domain::{Badge, Itinerary, ItineraryKind, Leg, Route, Stop, truncate_hhmm};
use crate::i18n::{Catalog, Language, keys};

/// Whether a card's detail panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded,
}

impl Expansion {
    pub fn toggled(self) -> Self {
        match self {
            Expansion::Collapsed => Expansion::Expanded,
            Expansion::Expanded => Expansion::Collapsed,
        }
    }
}

/// Render state carried alongside each itinerary.
///
/// `kind` is fixed when the results arrive; toggle labels are derived from
/// it and `expansion`, in whatever language is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    pub kind: ItineraryKind,
    pub expansion: Expansion,
}

impl CardState {
    pub fn collapsed(kind: ItineraryKind) -> Self {
        Self {
            kind,
            expansion: Expansion::Collapsed,
        }
    }

    /// Translation key for the toggle button.
    pub fn toggle_key(&self) -> &'static str {
        match (self.kind, self.expansion) {
            (ItineraryKind::Direct, Expansion::Collapsed) => keys::SHOW_STOPS,
            (ItineraryKind::Direct, Expansion::Expanded) => keys::HIDE_STOPS,
            (ItineraryKind::Connection, Expansion::Collapsed) => keys::SHOW_PATH,
            (ItineraryKind::Connection, Expansion::Expanded) => keys::HIDE_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub label: String,
    pub class: &'static str,
}

impl BadgeView {
    fn new(badge: &Badge, lang: Language) -> Self {
        let (key, class) = match badge {
            Badge::Fastest => (Some(keys::BADGE_FASTEST), "badge-fastest"),
            Badge::Fast => (Some(keys::BADGE_FAST), "badge-default"),
            Badge::Direct => (Some(keys::BADGE_DIRECT), "badge-direct"),
            Badge::BestOverall => (Some(keys::BADGE_BEST), "badge-best"),
            Badge::Other(_) => (None, "badge-default"),
        };
        let label = match key {
            Some(key) => Catalog::get(lang, key).to_string(),
            None => badge.name().to_string(),
        };
        Self { label, class }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferView {
    pub label: &'static str,
    pub station: String,
    pub wait_label: &'static str,
    pub wait_time: String,
}

/// One row of a stop list. `time` is empty when none is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRow {
    pub station: String,
    pub time: String,
}

impl StopRow {
    fn new(stop: &Stop, lang: Language) -> Self {
        Self {
            station: stop.station_in(lang).to_string(),
            time: stop.time.as_deref().map(truncate_hhmm).unwrap_or_default().to_string(),
        }
    }
}

/// Stops of one connection leg, under the leg's train and endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegGroup {
    pub train_label: String,
    pub from: String,
    pub to: String,
    pub stops: Vec<StopRow>,
}

impl LegGroup {
    fn new(leg: &Leg, lang: Language) -> Self {
        Self {
            train_label: train_label(&leg.train_number, lang),
            from: leg.from.clone(),
            to: leg.to.clone(),
            stops: rows(&leg.stops, lang),
        }
    }
}

/// Detail panel content: flat for direct trains, grouped by leg otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Stops(Vec<StopRow>),
    Legs(Vec<LegGroup>),
}

/// Everything the results template needs for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryCard {
    pub index: usize,
    pub kind_tag: &'static str,
    pub train_label: String,
    pub dep_label: &'static str,
    pub departure: String,
    pub arr_label: &'static str,
    pub arrival: String,
    pub duration: Option<String>,
    pub badges: Vec<BadgeView>,
    pub transfer: Option<TransferView>,
    pub toggle_label: &'static str,
    pub expanded: bool,
    pub detail: DetailView,
}

impl ItineraryCard {
    pub fn build(index: usize, itinerary: &Itinerary, state: CardState, lang: Language) -> Self {
        let detail = match &itinerary.route {
            Route::Direct { stops } => DetailView::Stops(rows(stops, lang)),
            Route::Connection { legs, .. } => {
                DetailView::Legs(legs.iter().map(|leg| LegGroup::new(leg, lang)).collect())
            }
        };

        let transfer = itinerary.transfer().map(|t| TransferView {
            label: Catalog::get(lang, keys::TRANSFER_AT),
            station: t.station_in(lang).to_string(),
            wait_label: Catalog::get(lang, keys::WAIT_TIME),
            wait_time: t.wait_time.clone(),
        });

        Self {
            index,
            kind_tag: match state.kind {
                ItineraryKind::Direct => "direct",
                ItineraryKind::Connection => "connection",
            },
            train_label: train_label(&itinerary.train_number, lang),
            dep_label: Catalog::get(lang, keys::DEP),
            departure: hhmm(itinerary.departure_time.as_deref()),
            arr_label: Catalog::get(lang, keys::ARR),
            arrival: hhmm(itinerary.arrival_time.as_deref()),
            duration: itinerary.duration.clone().filter(|d| !d.is_empty()),
            badges: itinerary
                .badges
                .iter()
                .map(|b| BadgeView::new(b, lang))
                .collect(),
            transfer,
            toggle_label: Catalog::get(lang, state.toggle_key()),
            expanded: state.expansion == Expansion::Expanded,
            detail,
        }
    }
}

/// The train identifier with the localized "Train" prefix, unless it
/// already starts with "train" or the localized word (ignoring case).
pub fn train_label(number: &str, lang: Language) -> String {
    let prefix = Catalog::get(lang, keys::TRAIN);
    let lowered = number.trim_start().to_lowercase();
    if lowered.starts_with("train") || lowered.starts_with(&prefix.to_lowercase()) {
        number.to_string()
    } else {
        format!("{prefix} {number}")
    }
}

fn rows(stops: &[Stop], lang: Language) -> Vec<StopRow> {
    stops.iter().map(|s| StopRow::new(s, lang)).collect()
}

fn hhmm(time: Option<&str>) -> String {
    time.map(truncate_hhmm).unwrap_or_default().to_string()
}
