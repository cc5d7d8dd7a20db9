//! Result cards, the results panel and the lines grid.

mod card;
mod results;
mod templates;

pub use card::{
    BadgeView, CardState, DetailView, Expansion, ItineraryCard, LegGroup, StopRow, TransferView,
    train_label,
};
pub use results::{Panel, ResultsView};
pub use templates::{LinesTemplate, ResultsTemplate};
