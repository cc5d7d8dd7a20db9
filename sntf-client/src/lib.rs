//! Client side of the SNTF train schedule lookup.
//!
//! The page pipeline (station autocomplete, time and day inputs, search,
//! result cards, French/Arabic switching) plus a caching agent that keeps
//! the page usable offline.

pub mod api;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod matcher;
pub mod offline;
pub mod page;
pub mod render;
pub mod search;
pub mod time_input;
pub mod web;
