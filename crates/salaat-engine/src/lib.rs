//! # salaat-engine
//!
//! Daily salaat event times and next-event resolution.
//!
//! The astronomy lives behind the [`SalaatEngine`] trait: given a civil date
//! and a location it returns ten epoch-second instants in a fixed order. This
//! crate turns that raw output into named events, stitches a day together
//! with the night before and the morning after, and answers "what comes
//! next" for any instant. Every query is recomputed from scratch; nothing is
//! cached.
//!
//! ## Modules
//!
//! - [`engine`] — Engine boundary: [`SalaatEngine`], [`Rounding`], sentinel handling
//! - [`event`] — Canonical event names and window keys
//! - [`location`] — Query location passed through to the engine
//! - [`day`] — One day's ten named events
//! - [`window`] — A day extended with the previous night and next sihori
//! - [`resolver`] — Earliest upcoming event for a reference instant
//! - [`calculator`] — The query surface bound to an injected engine
//! - [`config`] — JSON-loadable configuration
//! - [`error`] — Error types

pub mod calculator;
pub mod config;
pub mod day;
pub mod engine;
pub mod error;
pub mod event;
pub mod location;
pub mod resolver;
pub mod window;

pub use calculator::SalaatCalculator;
pub use config::SalaatConfig;
pub use day::DayEvents;
pub use engine::{RawTimes, Rounding, SalaatEngine, SENTINEL};
pub use error::SalaatError;
pub use event::{EventName, WindowKey};
pub use location::Location;
pub use resolver::{
    first_after, resolve_next, resolve_next_epoch, CandidateSet, NextEvent, ResolveOptions,
    FULL_CANDIDATES, STANDARD_CANDIDATES,
};
pub use window::{ExtendedWindow, PrevNight, WindowOptions};
