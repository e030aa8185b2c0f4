//! One day's named salaat events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::engine::{ingest, Rounding, SalaatEngine, SLOT_COUNT};
use crate::error::Result;
use crate::event::EventName;
use crate::location::Location;

/// The ten canonical events for a single date and location.
///
/// Every [`EventName`] always has an entry; an event the engine reports as
/// undefined is `None`. Serializes as a map of canonical key to epoch seconds
/// (or `null`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEvents {
    date: NaiveDate,
    times: [Option<DateTime<Utc>>; SLOT_COUNT],
}

impl DayEvents {
    /// Compute the safety-rounded events for `date` at `location`.
    ///
    /// Makes exactly one engine call.
    ///
    /// # Errors
    ///
    /// Propagates the engine's error unchanged, or returns
    /// [`SalaatError::InvalidTimestamp`](crate::SalaatError::InvalidTimestamp)
    /// if the engine emits a value that is not a representable instant.
    pub fn compute<E: SalaatEngine + ?Sized>(
        engine: &E,
        date: NaiveDate,
        location: &Location,
    ) -> Result<Self> {
        Self::compute_with_rounding(engine, date, location, Rounding::Safe)
    }

    /// Like [`compute`](Self::compute), but with an explicit engine variant.
    pub fn compute_with_rounding<E: SalaatEngine + ?Sized>(
        engine: &E,
        date: NaiveDate,
        location: &Location,
        rounding: Rounding,
    ) -> Result<Self> {
        debug!(%date, ?rounding, lat = location.latitude, lon = location.longitude, "engine call");
        let raw = engine.compute(date, location, rounding)?;
        Ok(Self {
            date,
            times: ingest(raw)?,
        })
    }

    /// The date these events were computed for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self, name: EventName) -> Option<DateTime<Utc>> {
        self.times[name.slot()]
    }

    /// Events in canonical order, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = (EventName, Option<DateTime<Utc>>)> + '_ {
        EventName::ALL.into_iter().map(|name| (name, self.get(name)))
    }

    /// Number of events that actually occur on this date.
    pub fn present_count(&self) -> usize {
        self.times.iter().filter(|t| t.is_some()).count()
    }
}

impl Serialize for DayEvents {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SLOT_COUNT))?;
        for (name, time) in self.iter() {
            map.serialize_entry(name.as_str(), &time.map(|t| t.timestamp()))?;
        }
        map.end()
    }
}
