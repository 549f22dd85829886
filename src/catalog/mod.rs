//! # Variable star catalog
//!
//! The catalog is an ordered list of [`CatalogEntry`] records, stored as a JSON array and read
//! once per search. This module owns:
//!
//! - The [`CatalogEntry`] record and its JSON layout.
//! - The **catalog filter**: cheap predicates ([`CatalogEntry::passes_magnitude`],
//!   [`CatalogEntry::has_valid_period`], [`CatalogEntry::passes`]) applied before any
//!   trigonometry.
//! - JSON I/O ([`load_catalog`], [`write_catalog`]) and the two published datasets
//!   ([`CatalogKind`]).
//! - The catalog builder, which turns the GCVS catalogue and the Krakow ephemeris list into a
//!   JSON catalog ([`gcvs_reader`], [`krakow_reader`], [`merge`]).
//!
//! ## JSON layout
//!
//! ```text
//! {
//!   "names": { "GCVS": "bet Per", "Krakow": "PER BETA" },
//!   "type": "EA/SD",
//!   "maximumMagnitude": 2.09,
//!   "minimumMagnitude": 3.3,
//!   "epoch": 2445641.5135,
//!   "period": 2.8673043,
//!   "eclipseTime": 0.4014,
//!   "rightAscension": 0.8210,
//!   "declination": 0.7148,
//!   "spectralType": "B8V"
//! }
//! ```
//!
//! Angles are radians, `epoch` is a Julian Date, `period` and `eclipseTime` are days.
pub mod gcvs_reader;
pub mod krakow_reader;
pub mod merge;

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{Day, JulianDate, Magnitude, Radian, FAST_PERIOD_THRESHOLD};
use crate::predictor_errors::PredictorError;
use crate::search_params::SearchParams;

/// One variable or eclipsing binary star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Identifiers keyed by catalogue name (`"GCVS"`, `"Krakow"`, ...)
    pub names: BTreeMap<String, String>,
    /// GCVS variability type (e.g. `"EA"`, `"EW"`, `"DSCT"`)
    #[serde(rename = "type")]
    pub variable_type: String,
    pub minimum_magnitude: Magnitude,
    pub maximum_magnitude: Magnitude,
    /// Reference event (minimum or maximum light)
    pub epoch: JulianDate,
    /// Zero or negative means non-periodic
    pub period: Day,
    /// Full eclipse duration, zero for a point-in-time extremum
    pub eclipse_time: Day,
    pub right_ascension: Radian,
    pub declination: Radian,
    #[serde(default)]
    pub spectral_type: String,
}

impl CatalogEntry {
    /// False when either magnitude is fainter than `max_magnitude`.
    pub fn passes_magnitude(&self, max_magnitude: Magnitude) -> bool {
        !(self.minimum_magnitude > max_magnitude || self.maximum_magnitude > max_magnitude)
    }

    /// True for a strictly positive period.
    pub fn has_valid_period(&self) -> bool {
        self.period > 0.0
    }

    /// Periodic source varying too fast to enumerate its cycles.
    pub fn is_fast_varying(&self) -> bool {
        self.has_valid_period() && self.period <= FAST_PERIOD_THRESHOLD
    }

    /// Pre-filter of the eclipse search.
    ///
    /// Composes the magnitude check with the period check when the search mode only
    /// accepts periodic entries.
    pub fn passes(&self, params: &SearchParams) -> bool {
        self.passes_magnitude(params.max_magnitude())
            && (!params.mode().requires_period() || self.has_valid_period())
    }

    /// Preferred display name: the GCVS designation, else the first identifier.
    pub fn display_name(&self) -> &str {
        self.names
            .get(merge::GCVS_KEY)
            .or_else(|| self.names.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// The two datasets published for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Eclipsing,
    Pulsating,
}

impl CatalogKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            CatalogKind::Eclipsing => "eclipsingVariableStarData.json",
            CatalogKind::Pulsating => "pulsatingVariableStarData.json",
        }
    }

    /// Location of this dataset inside `data_dir`
    pub fn path_in(&self, data_dir: &Utf8Path) -> Utf8PathBuf {
        data_dir.join(self.file_name())
    }
}

impl FromStr for CatalogKind {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eclipsing" => Ok(CatalogKind::Eclipsing),
            "pulsating" => Ok(CatalogKind::Pulsating),
            _ => Err(PredictorError::InvalidCatalogKind(s.to_string())),
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Eclipsing => write!(f, "eclipsing"),
            CatalogKind::Pulsating => write!(f, "pulsating"),
        }
    }
}

/// Read a JSON catalog file.
///
/// Arguments
/// -----------------
/// * `path`: path of a JSON array of [`CatalogEntry`].
///
/// Return
/// ----------
/// * The entries in file order, or [`PredictorError::IoError`] /
///   [`PredictorError::CatalogFormat`].
pub fn load_catalog(path: &Utf8Path) -> Result<Vec<CatalogEntry>, PredictorError> {
    let reader = BufReader::new(File::open(path)?);
    let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
    log::debug!("loaded {} catalog entries from {path}", entries.len());
    Ok(entries)
}

/// Write a catalog as a pretty-printed JSON array.
pub fn write_catalog(path: &Utf8Path, entries: &[CatalogEntry]) -> Result<(), PredictorError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    log::debug!("wrote {} catalog entries to {path}", entries.len());
    Ok(())
}
