//! Domain types for the schedule lookup client.
//!
//! Stations are loaded once at startup and never change; itineraries are
//! created per search response and discarded on the next search. Types
//! that carry a format invariant (`DepartureTime`, `DayOfWeek`) enforce it
//! at construction time.

mod itinerary;
mod station;
mod time;

pub use itinerary::{Badge, Itinerary, ItineraryKind, Leg, Route, Stop, Transfer};
pub use station::{Line, Station, StationId, StationList};
pub use time::{DayOfWeek, DepartureTime, InvalidDay, InvalidTime, truncate_hhmm};
