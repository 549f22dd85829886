//! # GCVS catalogue reader
//!
//! Parse the fixed-width **General Catalogue of Variable Stars** (`gcvs5.txt`) into
//! [`GcvsStar`] records.
//!
//! ## Field layout (0-based, end exclusive)
//! -----------------
//! * `8..18` – designation, normalized to `"<star> <constellation>"` (e.g. `"bet Per"`).
//! * `20..39` – J2000 position, `hhmmss.ss±ddmmss.s`.
//! * `41..50` – variability type.
//! * `52..60` – magnitude at maximum brightness.
//! * `62..74`, `75..87` – magnitudes at minimum; a value in parentheses is an amplitude added
//!   to the maximum. The fainter of the two is kept.
//! * `91..101` – epoch, Julian Date without its leading `24`.
//! * `111..126` – period in days.
//! * `131..133` – eclipse duration, percent of the period.
//! * `137..154` – spectral type.
//!
//! Columns past the end of a short line read as blank.
//!
//! ## Error Handling
//! -----------------
//! Each rejected line yields a [`ParseGcvsError`]. [`read_gcvs_file`] logs and skips those
//! lines; the header line is skipped.
use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::{Day, JulianDate, Magnitude, Radian};
use crate::conversion::{hms_to_rad, parse_dms_to_rad};
use crate::predictor_errors::PredictorError;

static STAR_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{1,2}|[a-z.]{1,3}\s+\d?|V\d{4})*\s+([A-Za-z]{3}).*$")
        .expect("GCVS name pattern")
});
static MAGNITUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([(<>])?\s*([-\d.]+)[\s:]*\)?$").expect("GCVS magnitude pattern")
});
static IGNORE_MAGNITUDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s\d().:'BRIJUVabcgpuvy*]*$").expect("GCVS ignored magnitude pattern")
});
static RA_DEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})(\d{2})(\d{2}\.\d*)\s*([+-]\d{2})(\d{2})(\d{2}\.\d*)\s*$")
        .expect("GCVS position pattern")
});
static SPECTRAL_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[OBAFGKM][0-9]?[IVX]*e?").expect("GCVS spectral type pattern"));

/// Shortest line still holding the designation, position, type and maximum magnitude.
const MIN_LINE_LENGTH: usize = 60;

/// Line-level parsing errors for GCVS records.
#[derive(Error, Debug, PartialEq)]
pub enum ParseGcvsError {
    #[error("The line is too short")]
    TooShortLine,
    #[error("Cannot match star name: {0}")]
    InvalidName(String),
    #[error("Star {0} has no valid max magnitude")]
    InvalidMaxMagnitude(String),
    #[error("Star {0} has no valid min magnitude")]
    InvalidMinMagnitude(String),
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Star {0} has a zero period")]
    ZeroPeriod(String),
    #[error("Invalid eclipse duration: {0}")]
    InvalidEclipseDuration(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// One GCVS record, angles in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct GcvsStar {
    pub name: String,
    pub variable_type: String,
    pub maximum_magnitude: Magnitude,
    pub minimum_magnitude: Magnitude,
    /// Zero when the catalogue gives none
    pub epoch: JulianDate,
    /// Zero when the catalogue gives none
    pub period: Day,
    pub eclipse_time: Day,
    pub right_ascension: Radian,
    pub declination: Radian,
    pub spectral_type: String,
}

/// Fixed-width column, blank when the line stops early.
fn column(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    line.get(start.min(len)..end.min(len)).unwrap_or("")
}

/// Decode one magnitude field.
///
/// Arguments
/// -----------------
/// * `base`: magnitude added to a parenthesized amplitude.
/// * `raw`: the raw field.
///
/// Return
/// ----------
/// * `Some(magnitude)`, or `None` for blank, passband-only or unreadable fields.
fn decode_magnitude(base: Magnitude, raw: &str) -> Option<Magnitude> {
    let trimmed = raw.trim();
    let Some(caps) = MAGNITUDE_RE.captures(trimmed) else {
        if !IGNORE_MAGNITUDE_RE.is_match(raw) {
            log::warn!("cannot decode magnitude \"{raw}\"");
        }
        return None;
    };

    let value: f64 = caps[2].parse().ok()?;
    match caps.get(1).map(|m| m.as_str()) {
        Some("(") => Some(base + value),
        _ => Some(value),
    }
}

/// Normalize the designation field into `"<star> <constellation>"`.
fn parse_star_name(raw: &str) -> Result<String, ParseGcvsError> {
    let invalid = || ParseGcvsError::InvalidName(raw.to_string());
    let caps = STAR_NAME_RE.captures(raw).ok_or_else(invalid)?;
    let star = caps.get(1).ok_or_else(invalid)?.as_str().trim();
    Ok(format!("{star} {}", caps[2].trim()))
}

fn parse_position(raw: &str) -> Result<(Radian, Radian), ParseGcvsError> {
    let invalid = || ParseGcvsError::InvalidPosition(raw.to_string());
    let caps = RA_DEC_RE.captures(raw.trim()).ok_or_else(invalid)?;

    let number = |i: usize| caps[i].parse::<f64>().map_err(|_| invalid());
    let ra = hms_to_rad(number(1)?, number(2)?, number(3)?);
    let dec = parse_dms_to_rad(&caps[4], &caps[5], &caps[6]).ok_or_else(invalid)?;
    Ok((ra, dec))
}

/// Parse a single GCVS record.
///
/// Arguments
/// -----------------
/// * `line`: one data line of the catalogue.
///
/// Return
/// ----------
/// * The parsed [`GcvsStar`], or the [`ParseGcvsError`] explaining the rejection. Lines with
///   an explicit zero or unreadable period are rejected; a blank period reads as zero.
pub fn parse_gcvs_line(line: &str) -> Result<GcvsStar, ParseGcvsError> {
    if line.len() < MIN_LINE_LENGTH {
        return Err(ParseGcvsError::TooShortLine);
    }

    let variable_type = column(line, 41, 50).trim().to_string();
    let name = parse_star_name(column(line, 8, 18))?;

    let maximum_magnitude = decode_magnitude(0.0, column(line, 52, 60))
        .ok_or_else(|| ParseGcvsError::InvalidMaxMagnitude(name.clone()))?;

    let min1 = decode_magnitude(maximum_magnitude, column(line, 62, 74));
    let min2 = decode_magnitude(maximum_magnitude, column(line, 75, 87));
    let minimum_magnitude = match (min1, min2) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => return Err(ParseGcvsError::InvalidMinMagnitude(name)),
    };

    let raw_epoch = column(line, 91, 101).trim();
    let epoch = if raw_epoch.is_empty() {
        0.0
    } else {
        format!("24{raw_epoch}")
            .parse()
            .map_err(|_| ParseGcvsError::InvalidEpoch(raw_epoch.to_string()))?
    };

    let raw_period = column(line, 111, 126).trim();
    let period: Day = if raw_period.is_empty() {
        0.0
    } else {
        let period: Day = raw_period
            .parse()
            .map_err(|_| ParseGcvsError::InvalidPeriod(raw_period.to_string()))?;
        if period == 0.0 {
            return Err(ParseGcvsError::ZeroPeriod(name));
        }
        period
    };

    let raw_percent = column(line, 131, 133).trim();
    let eclipse_time = if raw_percent.is_empty() {
        0.0
    } else {
        let percent: f64 = raw_percent
            .parse()
            .map_err(|_| ParseGcvsError::InvalidEclipseDuration(raw_percent.to_string()))?;
        percent * period / 100.0
    };

    let (right_ascension, declination) = parse_position(column(line, 20, 39))?;

    let raw_spectral = column(line, 137, 154).trim();
    let spectral_type = if SPECTRAL_TYPE_RE.is_match(raw_spectral) {
        raw_spectral.to_string()
    } else {
        String::new()
    };

    Ok(GcvsStar {
        name,
        variable_type,
        maximum_magnitude,
        minimum_magnitude,
        epoch,
        period,
        eclipse_time,
        right_ascension,
        declination,
        spectral_type,
    })
}

/// Parse every record of a GCVS file.
///
/// The header line is skipped. Rejected lines are logged and left out.
///
/// Arguments
/// -----------------
/// * `path`: path of the catalogue file.
///
/// Return
/// ----------
/// * The parsed stars in file order, or a [`PredictorError::IoError`].
pub fn read_gcvs_file(path: &Utf8Path) -> Result<Vec<GcvsStar>, PredictorError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_gcvs_records(&content))
}

/// Parse the content of a GCVS file, header line included.
pub fn parse_gcvs_records(content: &str) -> Vec<GcvsStar> {
    let mut line_count = 0usize;
    let stars: Vec<GcvsStar> = content
        .lines()
        .inspect(|_| line_count += 1)
        .skip(1)
        .filter_map(|line| match parse_gcvs_line(line) {
            Ok(star) => Some(star),
            Err(err @ ParseGcvsError::ZeroPeriod(_)) => {
                log::debug!("{err}");
                None
            }
            Err(err) => {
                log::warn!("skipping GCVS line: {err}");
                None
            }
        })
        .collect();

    log::info!("Found {} GCVS stars from {} lines", stars.len(), line_count);
    stars
}
