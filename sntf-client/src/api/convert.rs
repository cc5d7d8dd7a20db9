//! Conversion from wire types to domain types.

use crate::domain::{Badge, Itinerary, Leg, Line, Route, Stop, Transfer};

use super::types::{ItineraryDto, LegDto, LineDto, StopDto, TransferDto};

/// Marker the backend uses for a stop without a timetable entry.
const NO_TIME: &str = "-";

/// Convert a search record into an itinerary.
///
/// A record is a connection only when its `type` says so; anything else
/// is rendered as a direct train with a flat stop list.
pub fn convert_itinerary(dto: ItineraryDto) -> Itinerary {
    let route = if dto.kind.as_deref() == Some("connection") {
        Route::Connection {
            legs: dto.legs.into_iter().map(convert_leg).collect(),
            transfer: dto.transfer.map(convert_transfer),
        }
    } else {
        Route::Direct {
            stops: dto.stops.into_iter().map(convert_stop).collect(),
        }
    };

    Itinerary {
        train_number: dto.train_number,
        departure_time: dto.departure_time.and_then(non_empty),
        arrival_time: dto.arrival_time.and_then(non_empty),
        duration: dto.duration.and_then(non_empty),
        badges: Vec::new(),
        route,
    }
    .with_badges(dto.badges.iter().map(|b| Badge::from_name(b)))
}

pub(super) fn convert_line(dto: LineDto) -> Line {
    Line {
        code: dto.code,
        name: dto.name,
    }
}

fn convert_stop(dto: StopDto) -> Stop {
    Stop {
        station: dto.station,
        station_ar: dto.station_ar.and_then(non_empty),
        time: dto.time.filter(|t| t != NO_TIME).and_then(non_empty),
    }
}

fn convert_transfer(dto: TransferDto) -> Transfer {
    Transfer {
        station: dto.station,
        station_ar: dto.station_ar.and_then(non_empty),
        wait_time: dto.wait_time,
    }
}

fn convert_leg(dto: LegDto) -> Leg {
    Leg {
        train_number: dto.train,
        from: dto.from,
        to: dto.to,
        stops: dto.stops.into_iter().map(convert_stop).collect(),
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}
