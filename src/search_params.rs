//! # Search request parameters
//!
//! This module defines [`SearchParams`], the validated request descriptor consumed by
//! [`search_eclipses`](crate::eclipse_search::search_eclipses), together with its fluent
//! builder and a parser for raw string parameters as received by a serving layer.
//!
//! ## Units
//!
//! - Builder inputs are **degrees** (longitude, latitude, minimum altitude) and calendar
//!   timestamps or Julian Dates for the window.
//! - [`SearchParams`] stores **radians** and **Julian Dates**; the conversion happens once,
//!   in [`SearchParamsBuilder::build`].
//!
//! ## Example
//!
//! ```rust
//! use std::str::FromStr;
//! use hifitime::Epoch;
//! use eclipse_predictor::search_params::{SearchMode, SearchParams};
//!
//! let params = SearchParams::builder()
//!     .longitude(-1.25)
//!     .latitude(51.75)
//!     .min_altitude(20.0)
//!     .max_magnitude(12.0)
//!     .window(
//!         &Epoch::from_str("2024-03-01T20:00:00").unwrap(),
//!         &Epoch::from_str("2024-03-02T05:00:00").unwrap(),
//!     )
//!     .mode(SearchMode::Standard)
//!     .build()
//!     .unwrap();
//! assert!(params.window_start() < params.window_end());
//! ```
use std::fmt;
use std::str::FromStr;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::constants::{Degree, JulianDate, Magnitude, Radian};
use crate::conversion::deg_to_rad;
use crate::observer::ObserverLocation;
use crate::predictor_errors::PredictorError;
use crate::time::julian_date;

/// How the mid-event instant of each catalog entry is chosen.
///
/// Deserialization goes through [`FromStr`], so `"FAST"` and `" standard "` are accepted
/// there too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SearchMode {
    /// Propagate each entry's epoch by whole periods to the first event in the window.
    /// Non-periodic entries are rejected; fast-varying ones use the window midpoint.
    #[default]
    Standard,
    /// Use the window midpoint as a representative instant for every entry.
    Fast,
}

impl SearchMode {
    /// Whether this mode only accepts entries with a strictly positive period.
    pub fn requires_period(&self) -> bool {
        matches!(self, SearchMode::Standard)
    }
}

impl FromStr for SearchMode {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(SearchMode::Standard),
            "fast" => Ok(SearchMode::Fast),
            _ => Err(PredictorError::InvalidSearchMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for SearchMode {
    type Error = PredictorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Standard => write!(f, "standard"),
            SearchMode::Fast => write!(f, "fast"),
        }
    }
}

/// Validated parameters of one eclipse search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    observer: ObserverLocation,
    min_altitude: Radian,
    max_magnitude: Magnitude,
    window_start: JulianDate,
    window_end: JulianDate,
    mode: SearchMode,
    catalog_kind: CatalogKind,
}

impl SearchParams {
    /// Create a new [`SearchParamsBuilder`].
    pub fn builder() -> SearchParamsBuilder {
        SearchParamsBuilder::new()
    }

    /// Parse and validate raw string parameters.
    ///
    /// Fields are checked in request order (`searchType`, `searchMode`, `longitude`,
    /// `latitude`, `minimumAltitude`, `maximumMagnitude`, `startDate`, `endDate`); the first
    /// missing or malformed one is reported and nothing is computed. `searchMode` is the only
    /// optional field and defaults to [`SearchMode::Standard`].
    ///
    /// Arguments
    /// -----------------
    /// * `raw`: the parameters as strings, `None` for an absent field.
    ///
    /// Return
    /// ----------
    /// * The validated [`SearchParams`], or
    ///   - [`PredictorError::MissingParameter`] naming the first absent field,
    ///   - [`PredictorError::InvalidCatalogKind`], [`PredictorError::InvalidSearchMode`],
    ///     [`PredictorError::InvalidNumber`] or [`PredictorError::InvalidDate`] for malformed
    ///     fields,
    ///   - [`PredictorError::InvalidSearchParameter`] for out-of-range values.
    pub fn from_raw(raw: &RawSearchParams) -> Result<Self, PredictorError> {
        let catalog_kind: CatalogKind = required(&raw.search_type, "searchType")?.parse()?;
        let mode = match optional(&raw.search_mode) {
            Some(mode) => mode.parse()?,
            None => SearchMode::default(),
        };
        let longitude = parse_number(&raw.longitude, "longitude")?;
        let latitude = parse_number(&raw.latitude, "latitude")?;
        let min_altitude = parse_number(&raw.minimum_altitude, "minimumAltitude")?;
        let max_magnitude = parse_number(&raw.maximum_magnitude, "maximumMagnitude")?;
        let start = parse_date(&raw.start_date, "startDate")?;
        let end = parse_date(&raw.end_date, "endDate")?;

        SearchParams::builder()
            .catalog_kind(catalog_kind)
            .mode(mode)
            .longitude(longitude)
            .latitude(latitude)
            .min_altitude(min_altitude)
            .max_magnitude(max_magnitude)
            .window(&start, &end)
            .build()
    }

    pub fn observer(&self) -> &ObserverLocation {
        &self.observer
    }

    /// Minimum altitude in radians
    pub fn min_altitude(&self) -> Radian {
        self.min_altitude
    }

    pub fn max_magnitude(&self) -> Magnitude {
        self.max_magnitude
    }

    pub fn window_start(&self) -> JulianDate {
        self.window_start
    }

    pub fn window_end(&self) -> JulianDate {
        self.window_end
    }

    /// Midpoint of the window, the representative instant of fast-varying sources
    pub fn window_midpoint(&self) -> JulianDate {
        (self.window_end + self.window_start) / 2.0
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Dataset the request searches
    pub fn catalog_kind(&self) -> CatalogKind {
        self.catalog_kind
    }
}

/// Request parameters as received from the outside, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchParams {
    /// `eclipsing` or `pulsating`
    pub search_type: Option<String>,
    pub search_mode: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub minimum_altitude: Option<String>,
    pub maximum_magnitude: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn optional(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(
    field: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, PredictorError> {
    optional(field).ok_or(PredictorError::MissingParameter(name))
}

fn parse_number(field: &Option<String>, name: &'static str) -> Result<f64, PredictorError> {
    let value = required(field, name)?;
    value
        .parse::<f64>()
        .map_err(|_| PredictorError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

fn parse_date(field: &Option<String>, name: &'static str) -> Result<Epoch, PredictorError> {
    let value = required(field, name)?;
    Epoch::from_str(value).map_err(|e| PredictorError::InvalidDate(format!("{value}: {e}")))
}

/// Builder for [`SearchParams`], with validation.
#[derive(Debug, Clone)]
pub struct SearchParamsBuilder {
    longitude: Degree,
    latitude: Degree,
    min_altitude: Degree,
    max_magnitude: Magnitude,
    window: Option<(JulianDate, JulianDate)>,
    mode: SearchMode,
    catalog_kind: CatalogKind,
}

impl Default for SearchParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchParamsBuilder {
    /// Create a builder observing from (0°, 0°), down to the horizon, with no magnitude
    /// limit, over the eclipsing dataset. The window has no default and must be set.
    pub fn new() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            min_altitude: 0.0,
            max_magnitude: f64::INFINITY,
            window: None,
            mode: SearchMode::Standard,
            catalog_kind: CatalogKind::Eclipsing,
        }
    }

    /// East-positive longitude in degrees
    pub fn longitude(mut self, v: Degree) -> Self {
        self.longitude = v;
        self
    }
    /// Latitude in degrees
    pub fn latitude(mut self, v: Degree) -> Self {
        self.latitude = v;
        self
    }
    /// Minimum altitude in degrees
    pub fn min_altitude(mut self, v: Degree) -> Self {
        self.min_altitude = v;
        self
    }
    pub fn max_magnitude(mut self, v: Magnitude) -> Self {
        self.max_magnitude = v;
        self
    }
    pub fn mode(mut self, v: SearchMode) -> Self {
        self.mode = v;
        self
    }
    pub fn catalog_kind(mut self, v: CatalogKind) -> Self {
        self.catalog_kind = v;
        self
    }
    /// Search window from two calendar timestamps
    pub fn window(mut self, start: &Epoch, end: &Epoch) -> Self {
        self.window = Some((julian_date(start), julian_date(end)));
        self
    }
    /// Search window from two Julian Dates
    pub fn window_jd(mut self, start: JulianDate, end: JulianDate) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Finalize the builder and produce a [`SearchParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * longitude within `[-360, 360]` and latitude within `[-90, 90]` degrees.
    /// * `min_altitude` within `[-90, 90]` degrees.
    /// * `max_magnitude` is not NaN (`+∞` disables the magnitude filter).
    /// * the window is set, finite, and `start ≤ end`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SearchParams)` with angles in radians.
    /// * `Err(PredictorError::InvalidSearchParameter)` if any rule fails.
    pub fn build(self) -> Result<SearchParams, PredictorError> {
        let observer = ObserverLocation::new(self.longitude, self.latitude)?;

        if !(-90.0..=90.0).contains(&self.min_altitude) {
            return Err(PredictorError::InvalidSearchParameter(format!(
                "min_altitude must be within [-90, 90] degrees, got {}",
                self.min_altitude
            )));
        }
        if self.max_magnitude.is_nan() {
            return Err(PredictorError::InvalidSearchParameter(
                "max_magnitude must be a number".into(),
            ));
        }

        let (window_start, window_end) = self.window.ok_or_else(|| {
            PredictorError::InvalidSearchParameter("search window is not set".into())
        })?;
        if !window_start.is_finite() || !window_end.is_finite() {
            return Err(PredictorError::InvalidSearchParameter(
                "search window bounds must be finite".into(),
            ));
        }
        if window_start > window_end {
            return Err(PredictorError::InvalidSearchParameter(format!(
                "search window starts after it ends ({window_start} > {window_end})"
            )));
        }

        Ok(SearchParams {
            observer,
            min_altitude: deg_to_rad(self.min_altitude),
            max_magnitude: self.max_magnitude,
            window_start,
            window_end,
            mode: self.mode,
            catalog_kind: self.catalog_kind,
        })
    }
}

#[cfg(test)]
mod search_params_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::J2000_JD;

    fn full_raw() -> RawSearchParams {
        RawSearchParams {
            search_type: Some("eclipsing".into()),
            search_mode: Some("standard".into()),
            longitude: Some("-1.25".into()),
            latitude: Some("51.75".into()),
            minimum_altitude: Some("20".into()),
            maximum_magnitude: Some("12.5".into()),
            start_date: Some("2000-02-01T12:00:00".into()),
            end_date: Some("2000-02-02T00:00:00".into()),
        }
    }

    #[test]
    fn test_from_raw() {
        let params = SearchParams::from_raw(&full_raw()).unwrap();
        assert_eq!(params.mode(), SearchMode::Standard);
        assert_eq!(params.catalog_kind(), CatalogKind::Eclipsing);
        assert_eq!(params.max_magnitude(), 12.5);
        assert_eq!(params.window_start(), J2000_JD);
        assert_eq!(params.window_end(), J2000_JD + 0.5);
        assert_relative_eq!(params.min_altitude(), deg_to_rad(20.0));
        assert_relative_eq!(params.observer().latitude(), deg_to_rad(51.75));
    }

    #[test]
    fn test_missing_parameters_are_named() {
        let cases: [(fn(&mut RawSearchParams), &'static str); 7] = [
            (|r| r.search_type = None, "searchType"),
            (|r| r.longitude = None, "longitude"),
            (|r| r.latitude = None, "latitude"),
            (|r| r.minimum_altitude = None, "minimumAltitude"),
            (|r| r.maximum_magnitude = None, "maximumMagnitude"),
            (|r| r.start_date = None, "startDate"),
            (|r| r.end_date = Some("  ".into()), "endDate"),
        ];
        for (clear, name) in cases {
            let mut raw = full_raw();
            clear(&mut raw);
            assert_eq!(
                SearchParams::from_raw(&raw),
                Err(PredictorError::MissingParameter(name))
            );
        }
    }

    #[test]
    fn test_search_type_selects_dataset() {
        let mut raw = full_raw();
        raw.search_type = Some("pulsating".into());
        raw.search_mode = None;
        let params = SearchParams::from_raw(&raw).unwrap();
        assert_eq!(params.catalog_kind(), CatalogKind::Pulsating);
        assert_eq!(params.mode(), SearchMode::Standard);

        let mut raw = full_raw();
        raw.search_type = Some("mira".into());
        assert_eq!(
            SearchParams::from_raw(&raw),
            Err(PredictorError::InvalidCatalogKind("mira".into()))
        );

        // a missing type is reported before anything else
        assert_eq!(
            SearchParams::from_raw(&RawSearchParams::default()),
            Err(PredictorError::MissingParameter("searchType"))
        );
    }

    #[test]
    fn test_request_without_search_mode() {
        let raw: RawSearchParams = serde_json::from_value(serde_json::json!({
            "searchType": "eclipsing",
            "longitude": "-1.25",
            "latitude": "51.75",
            "minimumAltitude": "20",
            "maximumMagnitude": "12.5",
            "startDate": "2000-02-01T12:00:00",
            "endDate": "2000-02-02T00:00:00",
        }))
        .unwrap();
        let params = SearchParams::from_raw(&raw).unwrap();
        assert_eq!(params.mode(), SearchMode::Standard);
        assert_eq!(params.catalog_kind(), CatalogKind::Eclipsing);
    }

    #[test]
    fn test_malformed_parameters() {
        let mut raw = full_raw();
        raw.latitude = Some("north".into());
        assert_eq!(
            SearchParams::from_raw(&raw),
            Err(PredictorError::InvalidNumber {
                name: "latitude",
                value: "north".into()
            })
        );

        let mut raw = full_raw();
        raw.search_mode = Some("slow".into());
        assert_eq!(
            SearchParams::from_raw(&raw),
            Err(PredictorError::InvalidSearchMode("slow".into()))
        );

        let mut raw = full_raw();
        raw.start_date = Some("yesterday".into());
        assert!(matches!(
            SearchParams::from_raw(&raw),
            Err(PredictorError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_builder_validation() {
        assert!(SearchParams::builder().build().is_err());
        assert!(SearchParams::builder()
            .window_jd(10.0, 5.0)
            .build()
            .is_err());
        assert!(SearchParams::builder()
            .window_jd(5.0, 10.0)
            .min_altitude(95.0)
            .build()
            .is_err());
        assert!(SearchParams::builder()
            .window_jd(5.0, 10.0)
            .max_magnitude(f64::NAN)
            .build()
            .is_err());

        let params = SearchParams::builder().window_jd(5.0, 10.0).build().unwrap();
        assert_eq!(params.window_midpoint(), 7.5);
        assert_eq!(params.max_magnitude(), f64::INFINITY);
    }

    #[test]
    fn test_search_mode_parsing() {
        assert_eq!("FAST".parse::<SearchMode>().unwrap(), SearchMode::Fast);
        assert_eq!(" standard ".parse::<SearchMode>().unwrap(), SearchMode::Standard);
        assert!(SearchMode::Standard.requires_period());
        assert!(!SearchMode::Fast.requires_period());
        assert_eq!(SearchMode::Fast.to_string(), "fast");
    }

    #[test]
    fn test_search_mode_serde_matches_from_str() {
        let mode: SearchMode = serde_json::from_str("\"FAST\"").unwrap();
        assert_eq!(mode, SearchMode::Fast);
        let mode: SearchMode = serde_json::from_str("\" Standard \"").unwrap();
        assert_eq!(mode, SearchMode::Standard);
        assert!(serde_json::from_str::<SearchMode>("\"slow\"").is_err());
        assert_eq!(serde_json::to_string(&SearchMode::Fast).unwrap(), "\"fast\"");
    }
}
