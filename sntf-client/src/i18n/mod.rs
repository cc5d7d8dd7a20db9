//! Bilingual (French/Arabic) text support.
//!
//! The string tables are a fixed lookup keyed by language and key; the
//! keys double as the `data-i18n` attribute values of the page markup.

mod catalog;
mod language;

pub use catalog::{Catalog, keys};
pub use language::{Direction, Language, UnknownLanguage};
