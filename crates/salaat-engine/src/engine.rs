//! The astronomical engine boundary.
//!
//! The engine is the only component that knows any astronomy. Given a civil
//! date and a [`Location`] it returns ten epoch-second values in
//! [`EventName::ALL`](crate::event::EventName::ALL) order, with [`SENTINEL`]
//! marking an event that does not occur (e.g. the sun never reaches the
//! required depression angle at high latitudes).
//!
//! Anything implementing [`SalaatEngine`] can be injected, including plain
//! closures, so the orchestration layers run against a deterministic fake in
//! tests:
//!
//! ```
//! use chrono::NaiveDate;
//! use salaat_engine::{DayEvents, Location, Rounding, SalaatError};
//!
//! let engine = |_date: NaiveDate, _loc: &Location, _rounding: Rounding| {
//!     Err::<[i64; 10], _>(SalaatError::Engine("offline".to_string()))
//! };
//! let date = NaiveDate::from_ymd_opt(2020, 8, 9).unwrap();
//! let result = DayEvents::compute(&engine, date, &Location::new(42.5, -83.3, 0.0));
//! assert!(result.is_err());
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Result, SalaatError};
use crate::location::Location;

/// Value the engine uses for "undefined for this date/location".
pub const SENTINEL: i64 = -1;

/// Number of slots in every engine result.
pub const SLOT_COUNT: usize = 10;

/// Raw engine output: epoch seconds per slot, [`SENTINEL`] where undefined.
pub type RawTimes = [i64; SLOT_COUNT];

/// Which of the engine's two variants to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Exact instants.
    Unrounded,
    /// Rounded to the safe side: morning-ending events round earlier,
    /// evening-starting events round later.
    #[default]
    Safe,
}

/// An astronomical engine producing one day's raw salaat times.
pub trait SalaatEngine {
    /// Compute the ten raw event times for `date` at `location`.
    ///
    /// # Errors
    ///
    /// Implementations return [`SalaatError::Engine`] when the computation
    /// itself fails or the inputs are rejected.
    fn compute(&self, date: NaiveDate, location: &Location, rounding: Rounding)
        -> Result<RawTimes>;
}

impl<F> SalaatEngine for F
where
    F: Fn(NaiveDate, &Location, Rounding) -> Result<RawTimes>,
{
    fn compute(
        &self,
        date: NaiveDate,
        location: &Location,
        rounding: Rounding,
    ) -> Result<RawTimes> {
        self(date, location, rounding)
    }
}

/// Convert raw engine output into optional instants.
///
/// The sentinel becomes `None` here and nowhere else; nothing downstream
/// ever sees `-1`.
pub(crate) fn ingest(raw: RawTimes) -> Result<[Option<DateTime<Utc>>; SLOT_COUNT]> {
    let mut out = [None; SLOT_COUNT];
    for (slot, value) in raw.into_iter().enumerate() {
        out[slot] = to_instant(value)?;
    }
    Ok(out)
}

fn to_instant(value: i64) -> Result<Option<DateTime<Utc>>> {
    if value == SENTINEL {
        return Ok(None);
    }
    DateTime::from_timestamp(value, 0)
        .map(Some)
        .ok_or(SalaatError::InvalidTimestamp(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_maps_sentinel_to_none() {
        let mut raw = [1_597_000_000; SLOT_COUNT];
        raw[2] = SENTINEL;
        raw[9] = SENTINEL;
        let times = ingest(raw).unwrap();
        assert!(times[2].is_none());
        assert!(times[9].is_none());
        assert_eq!(times[0].unwrap().timestamp(), 1_597_000_000);
    }

    #[test]
    fn test_ingest_keeps_other_negative_values() {
        // Only -1 is the sentinel; earlier instants are legitimate.
        let mut raw = [0; SLOT_COUNT];
        raw[0] = -2;
        let times = ingest(raw).unwrap();
        assert_eq!(times[0].unwrap().timestamp(), -2);
    }

    #[test]
    fn test_ingest_rejects_unrepresentable_timestamp() {
        let mut raw = [0; SLOT_COUNT];
        raw[4] = i64::MAX;
        let err = ingest(raw).unwrap_err();
        assert_eq!(err, SalaatError::InvalidTimestamp(i64::MAX));
    }

    #[test]
    fn test_closure_engine_receives_arguments() {
        let engine = |date: NaiveDate, loc: &Location, rounding: Rounding| {
            assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
            assert_eq!(loc.altitude, 250.0);
            assert_eq!(rounding, Rounding::Unrounded);
            Ok::<RawTimes, SalaatError>([SENTINEL; SLOT_COUNT])
        };
        let raw = engine
            .compute(
                NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
                &Location::new(10.0, 20.0, 250.0),
                Rounding::Unrounded,
            )
            .unwrap();
        assert_eq!(raw, [SENTINEL; SLOT_COUNT]);
    }

    #[test]
    fn test_engine_usable_as_trait_object() {
        let closure = |_date: NaiveDate, _loc: &Location, _rounding: Rounding| {
            Ok::<RawTimes, SalaatError>([0; SLOT_COUNT])
        };
        let engine: &dyn SalaatEngine = &closure;
        let day = crate::day::DayEvents::compute(
            engine,
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            &Location::new(10.0, 20.0, 0.0),
        )
        .unwrap();
        assert_eq!(day.present_count(), SLOT_COUNT);
    }
}
