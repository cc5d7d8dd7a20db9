//! Askama templates for the results panel and the lines grid.

use askama::Template;

use crate::domain::Line;

use super::card::{DetailView, ItineraryCard};

/// Results panel: either a single message or the itinerary cards.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub message: Option<&'static str>,
    pub cards: Vec<ItineraryCard>,
}

/// Static grid of rail lines.
#[derive(Template)]
#[template(path = "lines.html")]
pub struct LinesTemplate {
    pub title: &'static str,
    pub lines: Vec<Line>,
}
