//! The query surface bound to one engine and location.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::SalaatConfig;
use crate::day::DayEvents;
use crate::engine::SalaatEngine;
use crate::error::Result;
use crate::location::Location;
use crate::resolver::{resolve_next, resolve_next_epoch, NextEvent, ResolveOptions};
use crate::window::{ExtendedWindow, WindowOptions};

/// Owns an injected engine and answers the three salaat queries for a
/// fixed location.
///
/// Nothing is cached between calls; every query goes back to the engine.
#[derive(Debug, Clone)]
pub struct SalaatCalculator<E> {
    engine: E,
    location: Location,
    options: ResolveOptions,
}

impl<E: SalaatEngine> SalaatCalculator<E> {
    pub fn new(engine: E, location: Location) -> Self {
        Self {
            engine,
            location,
            options: ResolveOptions::default(),
        }
    }

    /// Build a calculator from a loaded [`SalaatConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SalaatError::InvalidTimezone`](crate::SalaatError::InvalidTimezone)
    /// if the configured timezone is unknown.
    pub fn from_config(engine: E, config: &SalaatConfig) -> Result<Self> {
        Ok(Self {
            engine,
            location: config.location,
            options: config.resolve_options()?,
        })
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The ten rounded events for `date`.
    pub fn day_events(&self, date: NaiveDate) -> Result<DayEvents> {
        DayEvents::compute(&self.engine, date, &self.location)
    }

    /// The events for `date` extended with the requested neighbour fields.
    pub fn window(&self, date: NaiveDate, options: WindowOptions) -> Result<ExtendedWindow> {
        ExtendedWindow::build(&self.engine, date, &self.location, options)
    }

    /// The next upcoming event after `reference`, if any.
    pub fn next_event(&self, reference: DateTime<Utc>) -> Result<Option<NextEvent>> {
        resolve_next(&self.engine, reference, &self.location, &self.options)
    }

    /// [`next_event`](Self::next_event) with an epoch-seconds reference.
    pub fn next_event_epoch(&self, reference: i64) -> Result<Option<NextEvent>> {
        resolve_next_epoch(&self.engine, reference, &self.location, &self.options)
    }
}
