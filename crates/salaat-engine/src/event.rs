//! Event naming shared by every layer.
//!
//! [`EventName`] labels the ten per-day events in the order the engine
//! emits them. [`WindowKey`] additionally names the three fields borrowed
//! from adjacent days when a window is stitched together.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SalaatError;

/// One of the ten canonical per-day salaat events, in engine slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventName {
    /// End of the pre-dawn meal.
    Sihori,
    /// Start of the dawn prayer period.
    Fajr,
    Sunrise,
    /// Solar noon.
    Zawaal,
    ZohrEnd,
    AsrEnd,
    /// Sunset.
    Maghrib,
    /// Ten minutes past maghrib.
    MaghribEnd,
    /// Midpoint of the night (also the end of isha).
    NisfulLayl,
    NisfulLaylEnd,
}

impl EventName {
    /// All ten events, indexed by engine slot.
    pub const ALL: [EventName; 10] = [
        EventName::Sihori,
        EventName::Fajr,
        EventName::Sunrise,
        EventName::Zawaal,
        EventName::ZohrEnd,
        EventName::AsrEnd,
        EventName::Maghrib,
        EventName::MaghribEnd,
        EventName::NisfulLayl,
        EventName::NisfulLaylEnd,
    ];

    /// The engine slot this event occupies.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// The canonical key, e.g. `"zohr_end"`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Sihori => "sihori",
            EventName::Fajr => "fajr",
            EventName::Sunrise => "sunrise",
            EventName::Zawaal => "zawaal",
            EventName::ZohrEnd => "zohr_end",
            EventName::AsrEnd => "asr_end",
            EventName::Maghrib => "maghrib",
            EventName::MaghribEnd => "maghrib_end",
            EventName::NisfulLayl => "nisful_layl",
            EventName::NisfulLaylEnd => "nisful_layl_end",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = SalaatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SalaatError::InvalidConfig(format!("unknown event name '{s}'")))
    }
}

impl Serialize for EventName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A key into an [`ExtendedWindow`](crate::window::ExtendedWindow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKey {
    /// One of the target day's own events.
    Today(EventName),
    /// Previous day's `nisful_layl`.
    PrevNisfulLayl,
    /// Previous day's `nisful_layl_end`.
    PrevNisfulLaylEnd,
    /// Next day's `sihori`.
    NextSihori,
}

impl WindowKey {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowKey::Today(name) => name.as_str(),
            WindowKey::PrevNisfulLayl => "prev_nisful_layl",
            WindowKey::PrevNisfulLaylEnd => "prev_nisful_layl_end",
            WindowKey::NextSihori => "next_sihori",
        }
    }
}

impl From<EventName> for WindowKey {
    fn from(name: EventName) -> Self {
        WindowKey::Today(name)
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKey {
    type Err = SalaatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev_nisful_layl" => Ok(WindowKey::PrevNisfulLayl),
            "prev_nisful_layl_end" => Ok(WindowKey::PrevNisfulLaylEnd),
            "next_sihori" => Ok(WindowKey::NextSihori),
            other => other.parse().map(WindowKey::Today),
        }
    }
}

impl Serialize for WindowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_engine_order() {
        for (i, name) in EventName::ALL.iter().enumerate() {
            assert_eq!(name.slot(), i, "{name} is out of slot order");
        }
    }

    #[test]
    fn test_event_names_round_trip_through_keys() {
        for name in EventName::ALL {
            assert_eq!(name.as_str().parse::<EventName>().unwrap(), name);
        }
    }

    #[test]
    fn test_window_keys_parse_borrowed_fields() {
        assert_eq!(
            "prev_nisful_layl_end".parse::<WindowKey>().unwrap(),
            WindowKey::PrevNisfulLaylEnd
        );
        assert_eq!(
            "next_sihori".parse::<WindowKey>().unwrap(),
            WindowKey::NextSihori
        );
        assert_eq!(
            "maghrib".parse::<WindowKey>().unwrap(),
            WindowKey::Today(EventName::Maghrib)
        );
    }

    #[test]
    fn test_unknown_event_name_is_rejected() {
        let err = "isha".parse::<WindowKey>().unwrap_err().to_string();
        assert!(err.contains("unknown event name 'isha'"), "got: {err}");
    }

    #[test]
    fn test_event_name_serializes_as_key() {
        let json = serde_json::to_string(&EventName::NisfulLaylEnd).unwrap();
        assert_eq!(json, "\"nisful_layl_end\"");
    }
}
