//! Stitching a day's events together with its neighbours.
//!
//! Night events belong to the night that began the previous evening, and
//! tomorrow's sihori still matters while today's night is running. An
//! [`ExtendedWindow`] therefore carries the target day's ten events plus,
//! on request, the previous day's `nisful_layl`/`nisful_layl_end` and the
//! next day's `sihori`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::day::DayEvents;
use crate::engine::SalaatEngine;
use crate::error::{Result, SalaatError};
use crate::event::{EventName, WindowKey};
use crate::location::Location;

/// Which adjacent-day fields to splice into a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowOptions {
    /// Borrow `nisful_layl` and `nisful_layl_end` from the previous day.
    pub include_prev_night: bool,
    /// Borrow `sihori` from the next day.
    pub include_next_sihori: bool,
}

impl WindowOptions {
    /// Both adjacent days included.
    pub fn both() -> Self {
        Self {
            include_prev_night: true,
            include_next_sihori: true,
        }
    }

    pub fn with_prev_night(mut self, include: bool) -> Self {
        self.include_prev_night = include;
        self
    }

    pub fn with_next_sihori(mut self, include: bool) -> Self {
        self.include_next_sihori = include;
        self
    }
}

/// Fields borrowed from the previous day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrevNight {
    pub nisful_layl: Option<DateTime<Utc>>,
    pub nisful_layl_end: Option<DateTime<Utc>>,
}

/// A day's events extended with adjacent-day fields.
///
/// A field whose toggle was off is not part of the window at all:
/// [`get`](Self::get) returns `None` for it, whereas an enabled field whose
/// source event was undefined returns `Some(None)`. Serialization follows the
/// same rule: disabled keys are omitted, undefined values are `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedWindow {
    today: DayEvents,
    prev_night: Option<PrevNight>,
    next_sihori: Option<Option<DateTime<Utc>>>,
}

impl ExtendedWindow {
    /// Build the window for `date` at `location`.
    ///
    /// Always computes `date` itself; each enabled toggle costs one more
    /// engine call for the corresponding adjacent day. Month and year
    /// rollover is ordinary calendar arithmetic.
    ///
    /// # Errors
    ///
    /// Any engine failure fails the whole window; partial windows are never
    /// returned. [`SalaatError::DateOutOfRange`] is returned only when the
    /// adjacent day lies outside chrono's supported calendar.
    #[instrument(level = "debug", skip(engine))]
    pub fn build<E: SalaatEngine + ?Sized>(
        engine: &E,
        date: NaiveDate,
        location: &Location,
        options: WindowOptions,
    ) -> Result<Self> {
        let today = DayEvents::compute(engine, date, location)?;

        let prev_night = if options.include_prev_night {
            let prev_date = date
                .pred_opt()
                .ok_or_else(|| SalaatError::DateOutOfRange(format!("day before {date}")))?;
            let prev = DayEvents::compute(engine, prev_date, location)?;
            Some(PrevNight {
                nisful_layl: prev.get(EventName::NisfulLayl),
                nisful_layl_end: prev.get(EventName::NisfulLaylEnd),
            })
        } else {
            None
        };

        let next_sihori = if options.include_next_sihori {
            let next_date = date
                .succ_opt()
                .ok_or_else(|| SalaatError::DateOutOfRange(format!("day after {date}")))?;
            let next = DayEvents::compute(engine, next_date, location)?;
            Some(next.get(EventName::Sihori))
        } else {
            None
        };

        debug!(
            prev_night = prev_night.is_some(),
            next_sihori = next_sihori.is_some(),
            "window assembled"
        );

        Ok(Self {
            today,
            prev_night,
            next_sihori,
        })
    }

    /// The target day's own events.
    pub fn today(&self) -> &DayEvents {
        &self.today
    }

    /// The previous-night fields, if that toggle was on.
    pub fn prev_night(&self) -> Option<PrevNight> {
        self.prev_night
    }

    /// The next day's sihori, if that toggle was on.
    pub fn next_sihori(&self) -> Option<Option<DateTime<Utc>>> {
        self.next_sihori
    }

    /// Look up any key. The outer `Option` is key presence, the inner one
    /// is whether the event occurs.
    pub fn get(&self, key: WindowKey) -> Option<Option<DateTime<Utc>>> {
        match key {
            WindowKey::Today(name) => Some(self.today.get(name)),
            WindowKey::PrevNisfulLayl => self.prev_night.map(|p| p.nisful_layl),
            WindowKey::PrevNisfulLaylEnd => self.prev_night.map(|p| p.nisful_layl_end),
            WindowKey::NextSihori => self.next_sihori,
        }
    }

    pub fn contains_key(&self, key: WindowKey) -> bool {
        self.get(key).is_some()
    }

    /// Whether the present values among `keys` are non-decreasing in the
    /// given order. Absent values and missing keys are skipped.
    pub fn is_chronological(&self, keys: &[WindowKey]) -> bool {
        let mut last: Option<DateTime<Utc>> = None;
        for t in keys.iter().filter_map(|k| self.get(*k).flatten()) {
            if last.is_some_and(|prev| t < prev) {
                return false;
            }
            last = Some(t);
        }
        true
    }

    /// Every key present in this window with its value, in serialization
    /// order: the day's ten events, then the borrowed fields.
    pub fn entries(&self) -> impl Iterator<Item = (WindowKey, Option<DateTime<Utc>>)> + '_ {
        let borrowed = [
            WindowKey::PrevNisfulLayl,
            WindowKey::PrevNisfulLaylEnd,
            WindowKey::NextSihori,
        ];
        self.today
            .iter()
            .map(|(name, t)| (WindowKey::Today(name), t))
            .chain(
                borrowed
                    .into_iter()
                    .filter_map(|key| self.get(key).map(|t| (key, t))),
            )
    }
}

impl Serialize for ExtendedWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, time) in self.entries() {
            map.serialize_entry(key.as_str(), &time.map(|t| t.timestamp()))?;
        }
        map.end()
    }
}
