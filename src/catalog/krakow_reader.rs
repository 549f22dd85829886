//! # Krakow ephemeris reader
//!
//! Parse the Krakow list of eclipsing binary ephemerides into [`KrakowStar`] records. Those
//! ephemerides are more recent than the GCVS ones and override them when both catalogues list
//! the same star (see [`merge`](super::merge)).
//!
//! ## Field layout (0-based, end exclusive)
//! -----------------
//! * `0..9` – name as `"<CON> <STAR>"`, e.g. `"PER BETA"` or `"AND V338"`.
//! * `10..13` – ephemeris kind; only `ALL` and `PRI` (primary minimum) are kept.
//! * `14..26` – epoch of minimum (Julian Date).
//! * `33..46` – period in days.
use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::{Day, JulianDate};
use crate::predictor_errors::PredictorError;

static V_STAR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3})\sV([0-9]+)$").expect("Krakow V-name pattern"));
static STAR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3})\s([A-Z]+)$").expect("Krakow name pattern"));

const PERIOD_END: usize = 46;

/// Line-level parsing errors for Krakow records.
#[derive(Error, Debug, PartialEq)]
pub enum ParseKrakowError {
    #[error("The line is too short")]
    TooShortLine,
    #[error("Ephemeris kind {0} is neither ALL nor PRI")]
    IgnoredKind(String),
    #[error("Cannot match \"{0}\" to a star name")]
    InvalidName(String),
    #[error("Star {0} repeats the previous record")]
    Duplicate(String),
    #[error("Cannot convert \"{0}\" to julian day epoch")]
    InvalidEpoch(String),
    #[error("Cannot convert \"{0}\" to period")]
    InvalidPeriod(String),
}

/// One Krakow ephemeris.
#[derive(Debug, Clone, PartialEq)]
pub struct KrakowStar {
    /// Name as written in the Krakow list
    pub krakow_name: String,
    /// Same star in GCVS notation (`"bet Per"` style, upper-cased)
    pub gcvs_name: String,
    pub epoch: JulianDate,
    pub period: Day,
}

/// Translate a Krakow name into its GCVS designation.
///
/// `"AND V338"` becomes `"V0338 AND"`; `"PER BETA"` becomes `"BET PER"`, the star part being
/// cut to three letters.
fn gcvs_designation(raw_name: &str) -> Option<String> {
    if let Some(caps) = V_STAR_NAME_RE.captures(raw_name) {
        let number: u32 = caps[2].parse().ok()?;
        return Some(format!("V{number:04} {}", &caps[1]));
    }

    let caps = STAR_NAME_RE.captures(raw_name)?;
    let forename: String = caps[2].chars().take(3).collect();
    Some(format!("{forename} {}", &caps[1]))
}

/// Parse a single Krakow record.
///
/// Arguments
/// -----------------
/// * `line`: one data line of the list.
/// * `last_name`: GCVS designation of the previously accepted record; a record repeating it
///   is rejected with [`ParseKrakowError::Duplicate`].
///
/// Return
/// ----------
/// * The parsed [`KrakowStar`], or the reason the line was rejected.
pub fn parse_krakow_line(line: &str, last_name: &str) -> Result<KrakowStar, ParseKrakowError> {
    let (Some(raw_name), Some(raw_kind), Some(raw_epoch), Some(raw_period)) = (
        line.get(0..9),
        line.get(10..13),
        line.get(14..26),
        line.get(33..PERIOD_END),
    ) else {
        return Err(ParseKrakowError::TooShortLine);
    };

    let kind = raw_kind.to_ascii_uppercase();
    if kind != "ALL" && kind != "PRI" {
        return Err(ParseKrakowError::IgnoredKind(kind));
    }

    let krakow_name = raw_name.trim().to_string();
    let gcvs_name = gcvs_designation(&krakow_name)
        .ok_or_else(|| ParseKrakowError::InvalidName(krakow_name.clone()))?;
    if gcvs_name == last_name {
        return Err(ParseKrakowError::Duplicate(gcvs_name));
    }

    let epoch = raw_epoch
        .trim()
        .parse()
        .map_err(|_| ParseKrakowError::InvalidEpoch(raw_epoch.to_string()))?;
    let period = raw_period
        .trim()
        .parse()
        .map_err(|_| ParseKrakowError::InvalidPeriod(raw_period.to_string()))?;

    Ok(KrakowStar {
        krakow_name,
        gcvs_name,
        epoch,
        period,
    })
}

/// Parse every record of a Krakow file. See [`parse_krakow_records`].
pub fn read_krakow_file(path: &Utf8Path) -> Result<Vec<KrakowStar>, PredictorError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_krakow_records(&content))
}

/// Parse the content of a Krakow file.
///
/// The header line is skipped. Secondary-minimum and repeated records are dropped quietly,
/// malformed lines are logged.
pub fn parse_krakow_records(content: &str) -> Vec<KrakowStar> {
    let mut stars: Vec<KrakowStar> = Vec::new();
    let mut line_count = 0usize;

    for line in content.lines() {
        line_count += 1;
        if line_count < 2 {
            continue;
        }

        let last_name = stars.last().map(|s| s.gcvs_name.as_str()).unwrap_or("");
        match parse_krakow_line(line, last_name) {
            Ok(star) => stars.push(star),
            Err(ParseKrakowError::IgnoredKind(_) | ParseKrakowError::Duplicate(_)) => {}
            Err(err) => log::warn!("skipping Krakow line {line_count}: {err}"),
        }
    }

    log::info!("Found {} Krakow stars from {} lines", stars.len(), line_count);
    stars
}
