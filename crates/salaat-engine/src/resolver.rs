//! Next upcoming salaat event for a reference instant.
//!
//! The reference instant is placed on a civil date in the configured
//! timezone (the host's local timezone unless one is set), the window for that date is built with both neighbours, and
//! the candidate keys are scanned in order. The first candidate that is
//! present and strictly later than the reference wins.
//!
//! # Candidate order
//!
//! The standard list is
//! `prev_nisful_layl, prev_nisful_layl_end, sihori, sunrise, zawaal,
//! zohr_end, asr_end, maghrib, nisful_layl, nisful_layl_end, next_sihori`.
//! `fajr` and `maghrib_end` are not in it; use [`CandidateSet::Full`] to
//! include them.
//!
//! A first-match scan only equals a chronological minimum when the window's
//! values are non-decreasing in list order. The resolver checks this and
//! logs a warning when an engine breaks it, but still returns the first
//! match.

use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::engine::SalaatEngine;
use crate::error::{Result, SalaatError};
use crate::event::{EventName, WindowKey};
use crate::location::Location;
use crate::window::{ExtendedWindow, WindowOptions};

/// The standard 11-entry candidate list, in chronological order.
pub const STANDARD_CANDIDATES: [WindowKey; 11] = [
    WindowKey::PrevNisfulLayl,
    WindowKey::PrevNisfulLaylEnd,
    WindowKey::Today(EventName::Sihori),
    WindowKey::Today(EventName::Sunrise),
    WindowKey::Today(EventName::Zawaal),
    WindowKey::Today(EventName::ZohrEnd),
    WindowKey::Today(EventName::AsrEnd),
    WindowKey::Today(EventName::Maghrib),
    WindowKey::Today(EventName::NisfulLayl),
    WindowKey::Today(EventName::NisfulLaylEnd),
    WindowKey::NextSihori,
];

/// The standard list plus `fajr` and `maghrib_end`.
pub const FULL_CANDIDATES: [WindowKey; 13] = [
    WindowKey::PrevNisfulLayl,
    WindowKey::PrevNisfulLaylEnd,
    WindowKey::Today(EventName::Sihori),
    WindowKey::Today(EventName::Fajr),
    WindowKey::Today(EventName::Sunrise),
    WindowKey::Today(EventName::Zawaal),
    WindowKey::Today(EventName::ZohrEnd),
    WindowKey::Today(EventName::AsrEnd),
    WindowKey::Today(EventName::Maghrib),
    WindowKey::Today(EventName::MaghribEnd),
    WindowKey::Today(EventName::NisfulLayl),
    WindowKey::Today(EventName::NisfulLaylEnd),
    WindowKey::NextSihori,
];

/// Which events the resolver considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSet {
    /// [`STANDARD_CANDIDATES`].
    #[default]
    Standard,
    /// [`FULL_CANDIDATES`].
    Full,
}

impl CandidateSet {
    pub fn keys(self) -> &'static [WindowKey] {
        match self {
            CandidateSet::Standard => &STANDARD_CANDIDATES,
            CandidateSet::Full => &FULL_CANDIDATES,
        }
    }
}

/// Options for [`resolve_next`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Civil calendar used to decide which date the reference falls on.
    /// `None` follows the host's local timezone.
    pub timezone: Option<Tz>,
    pub candidates: CandidateSet,
}

impl ResolveOptions {
    /// Set the timezone from an IANA name.
    ///
    /// # Errors
    ///
    /// Returns [`SalaatError::InvalidTimezone`] for unknown names.
    pub fn with_timezone(mut self, timezone: &str) -> Result<Self> {
        self.timezone = Some(parse_timezone(timezone)?);
        Ok(self)
    }

    pub fn with_tz(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn with_candidates(mut self, candidates: CandidateSet) -> Self {
        self.candidates = candidates;
        self
    }

    /// The civil date containing `instant` in this timezone, or in the
    /// host's local timezone when none is set.
    pub fn civil_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.timezone {
            Some(tz) => instant.with_timezone(&tz).date_naive(),
            None => instant.with_timezone(&Local).date_naive(),
        }
    }
}

/// The resolved next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextEvent {
    pub name: WindowKey,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub at: DateTime<Utc>,
}

/// Resolve the earliest candidate event strictly after `reference`.
///
/// Returns `Ok(None)` when nothing in the reference date's window is later
/// than `reference` (e.g. it is already past `next_sihori`). That is a
/// normal answer, not an error.
///
/// # Errors
///
/// Engine failures from any of the three engine calls propagate unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use salaat_engine::{resolve_next, Location, ResolveOptions, Rounding, SalaatError};
///
/// // Every event one hour apart starting at 01:00 UTC on the requested date.
/// let engine = |date: NaiveDate, _loc: &Location, _r: Rounding| {
///     let base = date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
///     let mut raw = [0i64; 10];
///     for (i, slot) in raw.iter_mut().enumerate() {
///         *slot = base + (i as i64 + 1) * 3600;
///     }
///     Ok::<_, SalaatError>(raw)
/// };
///
/// let options = ResolveOptions::default().with_timezone("UTC").unwrap();
/// let now = Utc.with_ymd_and_hms(2020, 8, 9, 2, 30, 0).unwrap();
/// let next = resolve_next(&engine, now, &Location::new(0.0, 0.0, 0.0), &options)
///     .unwrap()
///     .unwrap();
/// // fajr (02:00) is not a standard candidate, so sunrise (03:00) comes next.
/// assert_eq!(next.name.as_str(), "sunrise");
/// ```
#[instrument(level = "debug", skip(engine))]
pub fn resolve_next<E: SalaatEngine + ?Sized>(
    engine: &E,
    reference: DateTime<Utc>,
    location: &Location,
    options: &ResolveOptions,
) -> Result<Option<NextEvent>> {
    let date = options.civil_date(reference);
    let window = ExtendedWindow::build(engine, date, location, WindowOptions::both())?;
    let keys = options.candidates.keys();

    if !window.is_chronological(keys) {
        warn!(%date, "window values are not in candidate order; first match may not be earliest");
    }

    let next = first_after(&window, reference, keys);
    debug!(?next, "resolved");
    Ok(next)
}

/// [`resolve_next`] with the reference given as epoch seconds.
///
/// # Errors
///
/// Returns [`SalaatError::InvalidTimestamp`] if `reference` is not a
/// representable instant, otherwise as [`resolve_next`].
pub fn resolve_next_epoch<E: SalaatEngine + ?Sized>(
    engine: &E,
    reference: i64,
    location: &Location,
    options: &ResolveOptions,
) -> Result<Option<NextEvent>> {
    let reference =
        DateTime::from_timestamp(reference, 0).ok_or(SalaatError::InvalidTimestamp(reference))?;
    resolve_next(engine, reference, location, options)
}

/// First key in `keys` whose window value is present and after `reference`.
///
/// Absent values and keys missing from the window are skipped.
pub fn first_after(
    window: &ExtendedWindow,
    reference: DateTime<Utc>,
    keys: &[WindowKey],
) -> Option<NextEvent> {
    keys.iter().find_map(|&key| {
        window
            .get(key)
            .flatten()
            .filter(|at| *at > reference)
            .map(|at| NextEvent { name: key, at })
    })
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| SalaatError::InvalidTimezone(format!("'{}'", s)))
}
