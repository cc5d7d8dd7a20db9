//! Itinerary types: one search result, direct or with a connection.
//!
//! Itineraries are ephemeral. They are built from a search response and
//! dropped when the next search starts. Time strings are kept as the
//! backend sent them; display code truncates them to "HH:MM".

use std::fmt;

use crate::i18n::Language;

/// A classification label attached to an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Badge {
    Fastest,
    Fast,
    Direct,
    BestOverall,
    /// A badge the client has no special handling for, kept verbatim.
    Other(String),
}

impl Badge {
    /// Map the backend's badge name to a badge.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Fastest" => Badge::Fastest,
            "Fast" => Badge::Fast,
            "Direct" => Badge::Direct,
            "Best Overall" => Badge::BestOverall,
            other => Badge::Other(other.to_string()),
        }
    }

    /// The backend's name for this badge.
    pub fn name(&self) -> &str {
        match self {
            Badge::Fastest => "Fastest",
            Badge::Fast => "Fast",
            Badge::Direct => "Direct",
            Badge::BestOverall => "Best Overall",
            Badge::Other(name) => name,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stop along a train's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub station: String,
    pub station_ar: Option<String>,
    /// `None` when the timetable has no time recorded for this stop.
    pub time: Option<String>,
}

impl Stop {
    pub fn new(station: impl Into<String>, time: Option<&str>) -> Self {
        Self {
            station: station.into(),
            station_ar: None,
            time: time.map(str::to_string),
        }
    }

    /// Station name in the given language, falling back to the primary name.
    pub fn station_in(&self, lang: Language) -> &str {
        localized(&self.station, self.station_ar.as_deref(), lang)
    }
}

/// Where and how long a connection waits between legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub station: String,
    pub station_ar: Option<String>,
    pub wait_time: String,
}

impl Transfer {
    pub fn station_in(&self, lang: Language) -> &str {
        localized(&self.station, self.station_ar.as_deref(), lang)
    }
}

/// One train segment of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub train_number: String,
    pub from: String,
    pub to: String,
    pub stops: Vec<Stop>,
}

/// The shape of an itinerary's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A single train, with its flat stop list.
    Direct { stops: Vec<Stop> },
    /// Several trains, with the transfer between them.
    Connection {
        legs: Vec<Leg>,
        transfer: Option<Transfer>,
    },
}

/// Which variant an itinerary is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItineraryKind {
    Direct,
    Connection,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// Train identifier; for connections, the backend joins the legs' numbers.
    pub train_number: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    /// Badges in the order the backend listed them, without duplicates.
    pub badges: Vec<Badge>,
    pub route: Route,
}

impl Itinerary {
    /// A direct itinerary with no badges and no duration.
    pub fn direct(
        train_number: impl Into<String>,
        departure: &str,
        arrival: &str,
        stops: Vec<Stop>,
    ) -> Self {
        Self {
            train_number: train_number.into(),
            departure_time: Some(departure.to_string()),
            arrival_time: Some(arrival.to_string()),
            duration: None,
            badges: Vec::new(),
            route: Route::Direct { stops },
        }
    }

    /// A connection itinerary with no badges and no duration.
    pub fn connection(
        train_number: impl Into<String>,
        departure: &str,
        arrival: &str,
        legs: Vec<Leg>,
        transfer: Option<Transfer>,
    ) -> Self {
        Self {
            train_number: train_number.into(),
            departure_time: Some(departure.to_string()),
            arrival_time: Some(arrival.to_string()),
            duration: None,
            badges: Vec::new(),
            route: Route::Connection { legs, transfer },
        }
    }

    /// Attach badges, dropping repeats.
    pub fn with_badges(mut self, badges: impl IntoIterator<Item = Badge>) -> Self {
        for badge in badges {
            if !self.badges.contains(&badge) {
                self.badges.push(badge);
            }
        }
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn kind(&self) -> ItineraryKind {
        match self.route {
            Route::Direct { .. } => ItineraryKind::Direct,
            Route::Connection { .. } => ItineraryKind::Connection,
        }
    }

    /// The transfer, if this is a connection that has one.
    pub fn transfer(&self) -> Option<&Transfer> {
        match &self.route {
            Route::Connection { transfer, .. } => transfer.as_ref(),
            Route::Direct { .. } => None,
        }
    }
}

fn localized<'a>(primary: &'a str, arabic: Option<&'a str>, lang: Language) -> &'a str {
    match (lang, arabic) {
        (Language::Ar, Some(name)) if !name.is_empty() => name,
        _ => primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_names_round_trip() {
        for name in ["Fastest", "Fast", "Direct", "Best Overall", "Night"] {
            assert_eq!(Badge::from_name(name).name(), name);
        }
        assert_eq!(Badge::from_name("Best Overall"), Badge::BestOverall);
        assert_eq!(Badge::from_name("Night"), Badge::Other("Night".into()));
    }

    #[test]
    fn with_badges_deduplicates() {
        let it = Itinerary::direct("105", "08:00", "09:00", vec![]).with_badges([
            Badge::Direct,
            Badge::Fastest,
            Badge::Direct,
        ]);
        assert_eq!(it.badges, vec![Badge::Direct, Badge::Fastest]);
    }

    #[test]
    fn kind_follows_route() {
        let direct = Itinerary::direct("105", "08:00", "09:00", vec![]);
        assert_eq!(direct.kind(), ItineraryKind::Direct);
        assert!(direct.transfer().is_none());

        let transfer = Transfer {
            station: "El Harrach".into(),
            station_ar: None,
            wait_time: "12 min".into(),
        };
        let conn = Itinerary::connection("1 + 2", "08:00", "10:00", vec![], Some(transfer));
        assert_eq!(conn.kind(), ItineraryKind::Connection);
        assert_eq!(conn.transfer().unwrap().station, "El Harrach");
    }

    #[test]
    fn stop_name_falls_back_to_primary() {
        let mut stop = Stop::new("Blida", Some("08:00"));
        assert_eq!(stop.station_in(Language::Ar), "Blida");

        stop.station_ar = Some("البليدة".into());
        assert_eq!(stop.station_in(Language::Ar), "البليدة");
        assert_eq!(stop.station_in(Language::Fr), "Blida");
    }
}
