//! Autocomplete input bound to a station id.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{Station, StationId, StationList};
use crate::i18n::Language;

use super::debounce::Debouncer;
use super::match_stations;

/// Which form field an autocomplete belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Origin,
    Destination,
}

/// A debounced request to recompute one field's suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPass {
    pub role: FieldRole,
    pub query: String,
}

/// Where a click landed, relative to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Panel,
    Elsewhere,
}

/// One entry of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub station: StationId,
    /// Station name in the language active when the entry was shown.
    pub label: String,
}

/// State of one station input: its text, the committed station id, and
/// the suggestion panel.
///
/// Typing does not clear the committed id; only selecting a suggestion
/// (or an explicit `set_selection`) changes it.
pub struct AutocompleteField {
    role: FieldRole,
    text: String,
    selected: Option<StationId>,
    suggestions: Vec<Suggestion>,
    panel_visible: bool,
    debouncer: Debouncer<MatchPass>,
}

impl AutocompleteField {
    /// Create an empty field whose match passes are sent to `passes`.
    pub fn new(role: FieldRole, debounce: Duration, passes: UnboundedSender<MatchPass>) -> Self {
        Self {
            role,
            text: String::new(),
            selected: None,
            suggestions: Vec::new(),
            panel_visible: false,
            debouncer: Debouncer::new(debounce, passes),
        }
    }

    /// Raw text input: update the displayed text and schedule a match pass.
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.debouncer.trigger(MatchPass {
            role: self.role,
            query: self.text.clone(),
        });
    }

    /// Run a match pass delivered by the debouncer.
    ///
    /// A blank query, or one with no matches, hides the panel.
    pub fn apply_matches(&mut self, pass: &MatchPass, stations: &StationList, lang: Language) {
        self.suggestions = match_stations(stations, &pass.query)
            .into_iter()
            .map(|s| suggestion(s, lang))
            .collect();
        self.panel_visible = !self.suggestions.is_empty();
    }

    /// Commit the suggestion at `index`: set text and id, close the panel.
    ///
    /// The display name is taken from the station list in `lang`, so it
    /// matches the language active at selection time.
    pub fn select(
        &mut self,
        index: usize,
        stations: &StationList,
        lang: Language,
    ) -> Option<StationId> {
        let chosen = self.suggestions.get(index)?.station;
        let station = stations.find(chosen)?;
        self.set_selection(station, lang);
        Some(chosen)
    }

    /// Commit a station directly.
    pub fn set_selection(&mut self, station: &Station, lang: Language) {
        self.debouncer.cancel();
        self.text = station.name_in(lang).to_string();
        self.selected = Some(station.id);
        self.close_panel();
    }

    /// A click anywhere on the page; outside both input and panel closes
    /// the panel without committing.
    pub fn on_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.panel_visible = false;
        }
    }

    /// Re-derive the displayed name of the committed station (and of any
    /// shown suggestions) in `lang`, by id.
    pub fn relabel(&mut self, stations: &StationList, lang: Language) {
        if let Some(station) = self.selected.and_then(|id| stations.find(id)) {
            self.text = station.name_in(lang).to_string();
        }
        for entry in &mut self.suggestions {
            if let Some(station) = stations.find(entry.station) {
                entry.label = station.name_in(lang).to_string();
            }
        }
    }

    /// Exchange text and committed station with another field.
    pub fn swap_with(&mut self, other: &mut AutocompleteField) {
        std::mem::swap(&mut self.text, &mut other.text);
        std::mem::swap(&mut self.selected, &mut other.selected);
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected(&self) -> Option<StationId> {
        self.selected
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Whether a match pass is waiting for the quiet period.
    pub fn is_pass_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn close_panel(&mut self) {
        self.panel_visible = false;
        self.suggestions.clear();
    }
}

fn suggestion(station: &Station, lang: Language) -> Suggestion {
    Suggestion {
        station: station.id,
        label: station.name_in(lang).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const QUIET: Duration = Duration::from_millis(300);

    fn stations() -> StationList {
        StationList::new(vec![
            Station::new(1, "Alger", "الجزائر"),
            Station::new(2, "Blida", "البليدة"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn typing_then_selecting_commits_id_and_name() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut field = AutocompleteField::new(FieldRole::Origin, QUIET, tx);
        let list = stations();

        field.on_input("al");
        assert!(field.is_pass_pending());
        let pass = rx.recv().await.unwrap();
        assert_eq!(pass.query, "al");

        field.apply_matches(&pass, &list, Language::Fr);
        assert!(field.is_panel_visible());
        let labels: Vec<_> = field.suggestions().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Alger"]);

        assert_eq!(field.select(0, &list, Language::Fr), Some(StationId::new(1)));
        assert_eq!(field.text(), "Alger");
        assert_eq!(field.selected(), Some(StationId::new(1)));
        assert!(!field.is_panel_visible());
        assert!(field.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_hides_panel() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut field = AutocompleteField::new(FieldRole::Origin, QUIET, tx);
        let list = stations();

        let pass = MatchPass {
            role: FieldRole::Origin,
            query: "b".into(),
        };
        field.apply_matches(&pass, &list, Language::Fr);
        assert!(field.is_panel_visible());

        let blank = MatchPass {
            role: FieldRole::Origin,
            query: "  ".into(),
        };
        field.apply_matches(&blank, &list, Language::Fr);
        assert!(!field.is_panel_visible());
        assert!(field.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn click_outside_closes_without_commit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut field = AutocompleteField::new(FieldRole::Destination, QUIET, tx);
        let list = stations();

        let pass = MatchPass {
            role: FieldRole::Destination,
            query: "blida".into(),
        };
        field.apply_matches(&pass, &list, Language::Fr);

        field.on_click(ClickTarget::Panel);
        assert!(field.is_panel_visible());
        field.on_click(ClickTarget::Input);
        assert!(field.is_panel_visible());

        field.on_click(ClickTarget::Elsewhere);
        assert!(!field.is_panel_visible());
        assert_eq!(field.selected(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn relabel_uses_id_not_text() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut field = AutocompleteField::new(FieldRole::Origin, QUIET, tx);
        let list = stations();

        field.set_selection(list.find(StationId::new(2)).unwrap(), Language::Fr);
        assert_eq!(field.text(), "Blida");

        field.relabel(&list, Language::Ar);
        assert_eq!(field.text(), "البليدة");
        assert_eq!(field.selected(), Some(StationId::new(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn select_out_of_range_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut field = AutocompleteField::new(FieldRole::Origin, QUIET, tx);
        assert_eq!(field.select(3, &stations(), Language::Fr), None);
        assert_eq!(field.selected(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn swap_exchanges_text_and_id() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let list = stations();
        let mut origin = AutocompleteField::new(FieldRole::Origin, QUIET, tx.clone());
        let mut dest = AutocompleteField::new(FieldRole::Destination, QUIET, tx);

        origin.set_selection(list.find(StationId::new(1)).unwrap(), Language::Fr);
        origin.swap_with(&mut dest);

        assert_eq!(origin.selected(), None);
        assert_eq!(origin.text(), "");
        assert_eq!(dest.selected(), Some(StationId::new(1)));
        assert_eq!(dest.text(), "Alger");
        assert_eq!(dest.role(), FieldRole::Destination);
    }
}
