//! The results panel and per-card toggle state.

use askama::Template;

use crate::domain::Itinerary;
use crate::i18n::{Catalog, Language, keys};

use super::card::{CardState, Expansion, ItineraryCard};
use super::templates::ResultsTemplate;

/// What the results panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Hidden,
    Loading,
    Invalid,
    Empty,
    Failed,
    Cards,
}

impl Panel {
    /// Translation key of the panel's message, if it shows one.
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            Panel::Loading => Some(keys::LOADING),
            Panel::Invalid => Some(keys::FILL_ALL_FIELDS),
            Panel::Empty => Some(keys::NO_TRAINS_FOUND),
            Panel::Failed => Some(keys::ERROR_LOADING),
            Panel::Hidden | Panel::Cards => None,
        }
    }
}

/// Retained itineraries plus one `CardState` each.
///
/// Cards are rebuilt from this on every render, so a language change never
/// leaves text in the previous language.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    panel: Panel,
    itineraries: Vec<Itinerary>,
    states: Vec<CardState>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn show_loading(&mut self) {
        self.replace(Panel::Loading, Vec::new());
    }

    pub fn show_invalid(&mut self) {
        self.replace(Panel::Invalid, Vec::new());
    }

    pub fn show_failed(&mut self) {
        self.replace(Panel::Failed, Vec::new());
    }

    /// Show a response; an empty one shows the "no trains found" message.
    pub fn show_results(&mut self, itineraries: Vec<Itinerary>) {
        let panel = if itineraries.is_empty() {
            Panel::Empty
        } else {
            Panel::Cards
        };
        self.replace(panel, itineraries);
    }

    /// Flip card `index` and return its new expansion.
    pub fn toggle(&mut self, index: usize) -> Option<Expansion> {
        let state = self.states.get_mut(index)?;
        state.expansion = state.expansion.toggled();
        Some(state.expansion)
    }

    pub fn state_of(&self, index: usize) -> Option<CardState> {
        self.states.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }

    /// View models for every card, in response order.
    pub fn cards(&self, lang: Language) -> Vec<ItineraryCard> {
        self.itineraries
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(i, (it, state))| ItineraryCard::build(i, it, *state, lang))
            .collect()
    }

    /// The panel's message in `lang`, when it shows one instead of cards.
    pub fn message(&self, lang: Language) -> Option<&'static str> {
        self.panel.message_key().map(|key| Catalog::get(lang, key))
    }

    /// Render the panel. A hidden panel renders as the empty string.
    pub fn render_html(&self, lang: Language) -> Result<String, askama::Error> {
        if self.panel == Panel::Hidden {
            return Ok(String::new());
        }
        ResultsTemplate {
            message: self.message(lang),
            cards: self.cards(lang),
        }
        .render()
    }

    fn replace(&mut self, panel: Panel, itineraries: Vec<Itinerary>) {
        self.states = itineraries
            .iter()
            .map(|it| CardState::collapsed(it.kind()))
            .collect();
        self.itineraries = itineraries;
        self.panel = panel;
    }
}
