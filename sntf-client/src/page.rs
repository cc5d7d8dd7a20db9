//! The page context: owned state for one search page and its event handling.
//!
//! Replaces ambient page globals with a single value that owns the station
//! list, the active language, the form inputs, the search orchestrator and
//! the results panel. Events go in through [`PageContext::handle`]; work
//! that needs the network comes back out as an [`Effect`].

use askama::Template;
use chrono::NaiveTime;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info, warn};

use crate::api::{ApiError, JourneyApi};
use crate::config::ClientConfig;
use crate::domain::{DayOfWeek, Itinerary, Line, StationId, StationList};
use crate::i18n::{Catalog, Direction, Language, keys};
use crate::matcher::{AutocompleteField, ClickTarget, FieldRole, MatchPass};
use crate::render::{LinesTemplate, ResultsView};
use crate::search::{
    MissingField, SearchError, SearchForm, SearchOrchestrator, SearchOutcome, SearchTicket,
    run_search,
};
use crate::time_input::{DaySelector, TimeField, TimeInput, TimeKey};

/// Keys of the static page elements carrying a `data-i18n` binding.
pub const BOUND_KEYS: &[&str] = &[
    keys::SEARCH_TITLE,
    keys::ORIGIN,
    keys::DESTINATION,
    keys::DEPARTURE_TIME,
    keys::DAY_OF_WEEK,
    keys::SEARCH_BTN,
    keys::RESULTS_TITLE,
    keys::LINES_TITLE,
    keys::MAP_TITLE,
    keys::FOOTER,
];

const DAY_KEYS: [&str; 7] = [
    keys::DAY_0,
    keys::DAY_1,
    keys::DAY_2,
    keys::DAY_3,
    keys::DAY_4,
    keys::DAY_5,
    keys::DAY_6,
];

/// A user interaction with the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    StationInput { role: FieldRole, text: String },
    SelectSuggestion { role: FieldRole, index: usize },
    Click { role: FieldRole, target: ClickTarget },
    TimeInput { field: TimeField, raw: String },
    TimeKey { field: TimeField, key: TimeKey, caret: usize },
    TimeFocus(TimeField),
    TimeBlur,
    SelectDay(DayOfWeek),
    SetLanguage(Language),
    SwapStations,
    Submit,
    ToggleCard(usize),
}

/// Follow-up work requested by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Send this search; hand the result to [`PageContext::complete_search`].
    Fetch(SearchTicket),
}

pub struct PageContext {
    config: ClientConfig,
    language: Language,
    stations: StationList,
    lines: Vec<Line>,
    origin: AutocompleteField,
    destination: AutocompleteField,
    time: TimeInput,
    day: DaySelector,
    orchestrator: SearchOrchestrator,
    results: ResultsView,
    passes: UnboundedReceiver<MatchPass>,
}

impl PageContext {
    /// A page with no stations yet, French active, time and day preset
    /// to now.
    pub fn new(config: ClientConfig) -> Self {
        let (tx, passes) = mpsc::unbounded_channel();
        Self {
            origin: AutocompleteField::new(FieldRole::Origin, config.debounce, tx.clone()),
            destination: AutocompleteField::new(FieldRole::Destination, config.debounce, tx),
            config,
            language: Language::default(),
            stations: StationList::empty(),
            lines: Vec::new(),
            time: TimeInput::now(),
            day: DaySelector::today(),
            orchestrator: SearchOrchestrator::new(),
            results: ResultsView::new(),
            passes,
        }
    }

    /// Preset the time fields and day selector.
    pub fn with_clock(mut self, time: NaiveTime, day: DayOfWeek) -> Self {
        self.time = TimeInput::at(time);
        self.day = DaySelector::new(day);
        self
    }

    /// Fetch the station and line lists concurrently.
    ///
    /// Failures are logged; the affected list stays empty and the page
    /// remains usable.
    pub async fn load<A: JourneyApi>(&mut self, api: &A) {
        let (stations, lines) = futures::join!(api.stations(), api.lines());

        match stations {
            Ok(stations) => {
                info!(count = stations.len(), "loaded stations");
                self.stations = StationList::new(stations);
            }
            Err(e) => error!(error = %e, "failed to load stations"),
        }
        match lines {
            Ok(lines) => self.lines = lines,
            Err(e) => warn!(error = %e, "failed to load lines"),
        }
    }

    pub fn handle(&mut self, event: PageEvent) -> Effect {
        match event {
            PageEvent::StationInput { role, text } => self.field_mut(role).on_input(text),
            PageEvent::SelectSuggestion { role, index } => {
                let (stations, lang) = (&self.stations, self.language);
                let field = match role {
                    FieldRole::Origin => &mut self.origin,
                    FieldRole::Destination => &mut self.destination,
                };
                field.select(index, stations, lang);
            }
            PageEvent::Click { role, target } => self.field_mut(role).on_click(target),
            PageEvent::TimeInput { field, raw } => self.time.input(field, &raw),
            PageEvent::TimeKey { field, key, caret } => self.time.key(field, key, caret),
            PageEvent::TimeFocus(field) => self.time.focus(field),
            PageEvent::TimeBlur => self.time.blur(),
            PageEvent::SelectDay(day) => self.day.set(day),
            PageEvent::SetLanguage(lang) => self.set_language(lang),
            PageEvent::SwapStations => self.swap_stations(),
            PageEvent::Submit => {
                if let Ok(ticket) = self.submit() {
                    return Effect::Fetch(ticket);
                }
            }
            PageEvent::ToggleCard(index) => {
                self.results.toggle(index);
            }
        }
        Effect::Nothing
    }

    /// Wait for the next debounced match pass.
    pub async fn next_match_pass(&mut self) -> Option<MatchPass> {
        self.passes.recv().await
    }

    /// Recompute suggestions for the field the pass belongs to.
    pub fn apply_match_pass(&mut self, pass: &MatchPass) {
        let (stations, lang) = (&self.stations, self.language);
        let field = match pass.role {
            FieldRole::Origin => &mut self.origin,
            FieldRole::Destination => &mut self.destination,
        };
        field.apply_matches(pass, stations, lang);
    }

    /// Switch language: direction follows, selected stations are renamed
    /// by id, and the results panel renders in the new language.
    pub fn set_language(&mut self, lang: Language) {
        self.language = lang;
        self.origin.relabel(&self.stations, lang);
        self.destination.relabel(&self.stations, lang);
        info!(lang = %lang, "language changed");
    }

    /// Exchange origin and destination, text and id both.
    pub fn swap_stations(&mut self) {
        self.origin.swap_with(&mut self.destination);
    }

    /// Apply the response to request `seq`. Returns whether it was applied.
    pub fn complete_search(&mut self, seq: u64, result: Result<Vec<Itinerary>, ApiError>) -> bool {
        match self.orchestrator.resolve(seq, result) {
            Some(outcome) => {
                self.show_outcome(outcome);
                true
            }
            None => false,
        }
    }

    /// Submit, send and apply one search; returns the number of results.
    pub async fn search<A: JourneyApi>(&mut self, api: &A) -> Result<usize, SearchError> {
        let ticket = self.submit()?;
        let result = run_search(api, ticket.criteria(), self.config.timeout).await;

        match self.orchestrator.resolve(ticket.seq(), result) {
            Some(SearchOutcome::Failed(e)) => {
                self.results.show_failed();
                Err(SearchError::Backend(e))
            }
            Some(outcome) => {
                self.show_outcome(outcome);
                Ok(self.results.len())
            }
            None => Ok(0),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    /// Text for every bound page element, as `(key, text)`.
    pub fn labels(&self) -> Vec<(&'static str, &'static str)> {
        BOUND_KEYS
            .iter()
            .copied()
            .map(|key| (key, Catalog::get(self.language, key)))
            .collect()
    }

    /// Placeholder text of the origin and destination inputs.
    pub fn placeholder(&self, role: FieldRole) -> &'static str {
        let key = match role {
            FieldRole::Origin => keys::PLACEHOLDER_ORIGIN,
            FieldRole::Destination => keys::PLACEHOLDER_DEST,
        };
        Catalog::get(self.language, key)
    }

    /// Whether the switch control for `lang` shows as active.
    pub fn is_switch_active(&self, lang: Language) -> bool {
        self.language == lang
    }

    /// Day selector options in the active language.
    pub fn day_options(&self) -> Vec<(DayOfWeek, &'static str)> {
        DAY_KEYS
            .into_iter()
            .enumerate()
            .filter_map(|(i, key)| {
                let day = DayOfWeek::from_index(i as u32).ok()?;
                Some((day, Catalog::get(self.language, key)))
            })
            .collect()
    }

    pub fn field(&self, role: FieldRole) -> &AutocompleteField {
        match role {
            FieldRole::Origin => &self.origin,
            FieldRole::Destination => &self.destination,
        }
    }

    pub fn selected(&self, role: FieldRole) -> Option<StationId> {
        self.field(role).selected()
    }

    pub fn stations(&self) -> &StationList {
        &self.stations
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn time(&self) -> &TimeInput {
        &self.time
    }

    pub fn day(&self) -> DayOfWeek {
        self.day.value()
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    /// The results panel in the active language.
    pub fn results_html(&self) -> Result<String, askama::Error> {
        self.results.render_html(self.language)
    }

    /// The lines grid in the active language.
    pub fn lines_html(&self) -> Result<String, askama::Error> {
        LinesTemplate {
            title: Catalog::get(self.language, keys::LINES_TITLE),
            lines: self.lines.clone(),
        }
        .render()
    }

    /// Form values as they stand now.
    pub fn form(&self) -> SearchForm {
        SearchForm {
            origin: self.origin.selected(),
            destination: self.destination.selected(),
            time: Some(self.time.canonical().to_string()),
            day: Some(self.day.value().index()),
        }
    }

    fn submit(&mut self) -> Result<SearchTicket, MissingField> {
        let submitted = self.orchestrator.submit(&self.form());
        match submitted {
            Ok(_) => self.results.show_loading(),
            Err(_) => self.results.show_invalid(),
        }
        submitted
    }

    fn show_outcome(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Results(itineraries) => self.results.show_results(itineraries),
            SearchOutcome::Empty => self.results.show_results(Vec::new()),
            SearchOutcome::Failed(_) => self.results.show_failed(),
        }
    }

    fn field_mut(&mut self, role: FieldRole) -> &mut AutocompleteField {
        match role {
            FieldRole::Origin => &mut self.origin,
            FieldRole::Destination => &mut self.destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::{MockBackend, MockReply};
    use crate::domain::{ItineraryKind, Station};
    use crate::render::{Expansion, Panel};
    use crate::search::SearchState;

    async fn backend() -> MockBackend {
        let api = MockBackend::new();
        api.set_stations(vec![
            Station::new(1, "Alger", "الجزائر"),
            Station::new(2, "Blida", "البليدة"),
        ])
        .await;
        api.set_lines(vec![Line {
            code: "L1".into(),
            name: "Alger - Thenia".into(),
        }])
        .await;
        api
    }

    async fn loaded_page(api: &MockBackend) -> PageContext {
        let mut page = PageContext::new(ClientConfig::default())
            .with_clock(NaiveTime::from_hms_opt(8, 0, 0).unwrap(), DayOfWeek::SUNDAY);
        page.load(api).await;
        page
    }

    async fn type_and_select(page: &mut PageContext, role: FieldRole, text: &str) {
        page.handle(PageEvent::StationInput {
            role,
            text: text.into(),
        });
        let pass = page.next_match_pass().await.unwrap();
        page.apply_match_pass(&pass);
        page.handle(PageEvent::SelectSuggestion { role, index: 0 });
    }

    fn one_result() -> Vec<Itinerary> {
        vec![Itinerary::direct("105", "08:10", "09:00", vec![])]
    }

    #[tokio::test(start_paused = true)]
    async fn typing_al_suggests_alger() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;

        page.handle(PageEvent::StationInput {
            role: FieldRole::Origin,
            text: "al".into(),
        });
        let pass = page.next_match_pass().await.unwrap();
        page.apply_match_pass(&pass);

        let labels: Vec<_> = page
            .field(FieldRole::Origin)
            .suggestions()
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, ["Alger"]);

        page.handle(PageEvent::SelectSuggestion {
            role: FieldRole::Origin,
            index: 0,
        });
        assert_eq!(page.selected(FieldRole::Origin), Some(StationId::new(1)));
        assert_eq!(page.field(FieldRole::Origin).text(), "Alger");
        assert!(!page.field(FieldRole::Origin).is_panel_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_keystrokes_yields_one_pass() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;

        for text in ["b", "bl", "bli"] {
            page.handle(PageEvent::StationInput {
                role: FieldRole::Destination,
                text: text.into(),
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let pass = page.next_match_pass().await.unwrap();
        assert_eq!(pass.query, "bli");
        let more = tokio::time::timeout(Duration::from_secs(1), page.next_match_pass()).await;
        assert!(more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn language_switch_relabels_by_id() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;

        page.handle(PageEvent::SetLanguage(Language::Ar));

        assert_eq!(page.direction(), Direction::Rtl);
        assert_eq!(page.field(FieldRole::Origin).text(), "الجزائر");
        assert_eq!(page.selected(FieldRole::Origin), Some(StationId::new(1)));
        assert!(page.is_switch_active(Language::Ar));
        assert!(!page.is_switch_active(Language::Fr));
        assert_eq!(page.placeholder(FieldRole::Origin), "محطة الانطلاق...");
        for (key, text) in page.labels() {
            assert_eq!(Some(text), Catalog::text(Language::Ar, key));
        }

        page.set_language(Language::Fr);
        assert_eq!(page.direction(), Direction::Ltr);
        assert_eq!(page.field(FieldRole::Origin).text(), "Alger");
    }

    #[tokio::test]
    async fn incomplete_form_sends_nothing() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;

        assert_eq!(page.handle(PageEvent::Submit), Effect::Nothing);
        assert!(matches!(
            page.search(&api).await,
            Err(SearchError::Validation(MissingField::Origin))
        ));
        assert_eq!(api.search_calls(), 0);
        assert_eq!(page.results().panel(), Panel::Invalid);
        assert_eq!(
            page.results().message(page.language()),
            Some("Veuillez remplir tous les champs")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn submit_sends_form_values() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;
        type_and_select(&mut page, FieldRole::Destination, "bli").await;
        page.handle(PageEvent::TimeInput {
            field: TimeField::Minutes,
            raw: "75".into(),
        });
        page.handle(PageEvent::SelectDay(DayOfWeek::from_index(3).unwrap()));

        let Effect::Fetch(ticket) = page.handle(PageEvent::Submit) else {
            panic!("expected a fetch");
        };
        assert_eq!(page.results().panel(), Panel::Loading);
        assert_eq!(
            ticket.criteria().query_pairs(),
            vec![
                ("from", "1".to_string()),
                ("to", "2".to_string()),
                ("time", "08:59".to_string()),
                ("day", "3".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_does_not_overwrite_newer_one() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;
        type_and_select(&mut page, FieldRole::Destination, "bli").await;

        let Effect::Fetch(first) = page.handle(PageEvent::Submit) else {
            panic!("expected a fetch");
        };
        let Effect::Fetch(second) = page.handle(PageEvent::Submit) else {
            panic!("expected a fetch");
        };

        assert!(page.complete_search(second.seq(), Ok(Vec::new())));
        assert!(!page.complete_search(first.seq(), Ok(one_result())));
        assert_eq!(page.results().panel(), Panel::Empty);
        assert_eq!(page.orchestrator().state(), &SearchState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn search_round_trip_and_toggle() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;
        type_and_select(&mut page, FieldRole::Destination, "bli").await;

        api.push_reply(MockReply::Results(one_result())).await;
        assert_eq!(page.search(&api).await.unwrap(), 1);
        assert_eq!(page.results().panel(), Panel::Cards);
        assert_eq!(
            page.results().state_of(0).unwrap().kind,
            ItineraryKind::Direct
        );

        page.handle(PageEvent::ToggleCard(0));
        assert_eq!(
            page.results().state_of(0).unwrap().expansion,
            Expansion::Expanded
        );

        page.set_language(Language::Ar);
        let html = page.results_html().unwrap();
        assert!(html.contains("إخفاء المحطات"));
        assert!(html.contains("قطار 105"));
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_shows_error() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;
        type_and_select(&mut page, FieldRole::Destination, "bli").await;

        api.push_reply(MockReply::Malformed).await;
        let err = page.search(&api).await.unwrap_err();
        assert!(matches!(err, SearchError::Backend(ref e) if e.is_decoding()));
        assert_eq!(page.results().panel(), Panel::Failed);
        assert_eq!(page.orchestrator().state(), &SearchState::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn station_load_failure_leaves_empty_list() {
        let api = backend().await;
        api.set_stations_unavailable(true);
        let mut page = loaded_page(&api).await;

        assert!(page.stations().is_empty());
        assert_eq!(page.lines().len(), 1);

        page.handle(PageEvent::StationInput {
            role: FieldRole::Origin,
            text: "al".into(),
        });
        let pass = page.next_match_pass().await.unwrap();
        page.apply_match_pass(&pass);
        assert!(page.field(FieldRole::Origin).suggestions().is_empty());
        assert!(!page.field(FieldRole::Origin).is_panel_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn swap_exchanges_text_and_id() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;
        type_and_select(&mut page, FieldRole::Origin, "alg").await;
        type_and_select(&mut page, FieldRole::Destination, "bli").await;

        page.handle(PageEvent::SwapStations);
        assert_eq!(page.selected(FieldRole::Origin), Some(StationId::new(2)));
        assert_eq!(page.field(FieldRole::Origin).text(), "Blida");
        assert_eq!(page.selected(FieldRole::Destination), Some(StationId::new(1)));
    }

    #[tokio::test]
    async fn lines_grid_and_day_options() {
        let api = backend().await;
        let mut page = loaded_page(&api).await;

        let html = page.lines_html().unwrap();
        assert!(html.contains("Lignes SNTF"));
        assert!(html.contains("Alger - Thenia"));

        page.set_language(Language::Ar);
        let days = page.day_options();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].1, "الأحد");
        assert_eq!(page.day(), DayOfWeek::SUNDAY);
    }
}
