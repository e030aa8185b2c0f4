//! Serde-loadable configuration.
//!
//! ```json
//! {
//!   "location": { "latitude": 42.5112, "longitude": -83.3466, "altitude": 0 },
//!   "timezone": "America/Detroit",
//!   "candidates": "standard"
//! }
//! ```
//!
//! Without `timezone`, civil dates follow the host's local timezone.
//! `candidates` defaults to `"standard"`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SalaatError};
use crate::location::Location;
use crate::resolver::{parse_timezone, CandidateSet, ResolveOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaatConfig {
    pub location: Location,
    /// IANA timezone name used to derive civil dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub candidates: CandidateSet,
}

impl SalaatConfig {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            timezone: None,
            candidates: CandidateSet::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_candidates(mut self, candidates: CandidateSet) -> Self {
        self.candidates = candidates;
        self
    }

    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SalaatError::InvalidConfig`] for malformed JSON or missing
    /// fields. The timezone name is not checked until
    /// [`resolve_options`](Self::resolve_options).
    pub fn from_json(s: &str) -> Result<Self> {
        debug!("Loading configuration from JSON");
        serde_json::from_str(s).map_err(|e| SalaatError::InvalidConfig(e.to_string()))
    }

    /// Resolver options for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SalaatError::InvalidTimezone`] if `timezone` is set but is
    /// not a valid IANA name.
    pub fn resolve_options(&self) -> Result<ResolveOptions> {
        Ok(ResolveOptions {
            timezone: self.timezone.as_deref().map(parse_timezone).transpose()?,
            candidates: self.candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn test_config_from_full_json() {
        let config = SalaatConfig::from_json(
            r#"{
                "location": { "latitude": 42.5112, "longitude": -83.3466, "altitude": 190 },
                "timezone": "America/Detroit",
                "candidates": "full"
            }"#,
        )
        .unwrap();
        assert_eq!(config.location, Location::new(42.5112, -83.3466, 190.0));
        let options = config.resolve_options().unwrap();
        assert_eq!(options.timezone, Some(Tz::America__Detroit));
        assert_eq!(options.candidates, CandidateSet::Full);
    }

    #[test]
    fn test_config_defaults() {
        let config =
            SalaatConfig::from_json(r#"{ "location": { "latitude": 0, "longitude": 0 } }"#)
                .unwrap();
        assert_eq!(config, SalaatConfig::new(Location::new(0.0, 0.0, 0.0)));
        let options = config.resolve_options().unwrap();
        assert_eq!(config.timezone, None);
        assert_eq!(options.timezone, None);
        assert_eq!(options.candidates, CandidateSet::Standard);
    }

    #[test]
    fn test_config_missing_location_is_invalid() {
        let err = SalaatConfig::from_json(r#"{ "timezone": "UTC" }"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid config"), "got: {err}");
        assert!(err.contains("location"), "got: {err}");
    }

    #[test]
    fn test_config_unknown_candidate_set_is_invalid() {
        let err = SalaatConfig::from_json(
            r#"{ "location": { "latitude": 0, "longitude": 0 }, "candidates": "all" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SalaatError::InvalidConfig(_)), "got: {err}");
    }

    #[test]
    fn test_config_bad_timezone_fails_on_resolve() {
        let config = SalaatConfig::new(Location::new(0.0, 0.0, 0.0)).with_timezone("Nowhere/Land");
        let err = config.resolve_options().unwrap_err().to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_config_without_timezone_omits_it() {
        let config = SalaatConfig::new(Location::new(0.0, 0.0, 0.0));
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("timezone").is_none());
        assert_eq!(json["candidates"], "standard");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SalaatConfig::new(Location::new(21.4225, 39.8262, 277.0))
            .with_timezone("Asia/Riyadh")
            .with_candidates(CandidateSet::Full);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SalaatConfig::from_json(&json).unwrap(), config);
    }
}
