//! Search criteria and their validation.

use crate::domain::{DayOfWeek, DepartureTime, StationId};

/// A required form field that is empty or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingField {
    #[error("origin station not selected")]
    Origin,
    #[error("destination station not selected")]
    Destination,
    #[error("departure time missing or malformed")]
    DepartureTime,
    #[error("day of week missing or out of range")]
    Day,
}

/// Raw form state at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub origin: Option<StationId>,
    pub destination: Option<StationId>,
    /// Canonical "HH:MM" text
    pub time: Option<String>,
    /// 0 (Sunday) to 6 (Saturday)
    pub day: Option<u32>,
}

/// A complete, well-formed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    pub origin: StationId,
    pub destination: StationId,
    pub time: DepartureTime,
    pub day: DayOfWeek,
}

impl SearchCriteria {
    pub fn new(
        origin: StationId,
        destination: StationId,
        time: DepartureTime,
        day: DayOfWeek,
    ) -> Self {
        Self {
            origin,
            destination,
            time,
            day,
        }
    }

    /// Validate a submitted form, reporting the first missing field.
    pub fn from_form(form: &SearchForm) -> Result<Self, MissingField> {
        let origin = form.origin.ok_or(MissingField::Origin)?;
        let destination = form.destination.ok_or(MissingField::Destination)?;
        let time = form
            .time
            .as_deref()
            .and_then(|t| DepartureTime::parse_hhmm(t).ok())
            .ok_or(MissingField::DepartureTime)?;
        let day = form
            .day
            .and_then(|d| DayOfWeek::from_index(d).ok())
            .ok_or(MissingField::Day)?;

        Ok(Self::new(origin, destination, time, day))
    }

    /// Query parameters for `GET /api/search/`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.origin.to_string()),
            ("to", self.destination.to_string()),
            ("time", self.time.to_string()),
            ("day", self.day.to_string()),
        ]
    }
}
