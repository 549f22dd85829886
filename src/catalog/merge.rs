//! Merge the GCVS catalogue with the Krakow ephemerides into [`CatalogEntry`] records.
use std::collections::BTreeMap;

use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;

use super::gcvs_reader::{read_gcvs_file, GcvsStar};
use super::krakow_reader::{read_krakow_file, KrakowStar};
use super::{write_catalog, CatalogEntry};
use crate::predictor_errors::PredictorError;

pub const GCVS_KEY: &str = "GCVS";
pub const KRAKOW_KEY: &str = "Krakow";

/// GCVS types of eclipsing binaries (`EA`, `EW`, `EB`, `EP`, with optional subtype).
static ECLIPSING_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^E([AWBP])?([+/:].*)?$").expect("eclipsing type pattern"));

/// Result of [`merge_catalogs`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCatalog {
    pub entries: Vec<CatalogEntry>,
    /// Krakow ephemerides no GCVS star matched
    pub unmatched: Vec<KrakowStar>,
}

fn entry_from_gcvs(star: GcvsStar) -> CatalogEntry {
    CatalogEntry {
        names: BTreeMap::from([(GCVS_KEY.to_string(), star.name)]),
        variable_type: star.variable_type,
        minimum_magnitude: star.minimum_magnitude,
        maximum_magnitude: star.maximum_magnitude,
        epoch: star.epoch,
        period: star.period,
        eclipse_time: star.eclipse_time,
        right_ascension: star.right_ascension,
        declination: star.declination,
        spectral_type: star.spectral_type,
    }
}

/// Build catalog entries from both catalogues.
///
/// Arguments
/// -----------------
/// * `gcvs_stars`: GCVS records, in output order.
/// * `krakow_stars`: Krakow ephemerides.
///
/// Return
/// ----------
/// * A [`MergedCatalog`] where
///   - a GCVS star matched by a Krakow record (names compared case-insensitively) takes the
///     Krakow epoch and period and records the Krakow name; each Krakow record matches once,
///   - an unmatched GCVS star is kept only when its type is an eclipsing type,
///   - entries left with a zero period are dropped.
pub fn merge_catalogs(gcvs_stars: Vec<GcvsStar>, krakow_stars: Vec<KrakowStar>) -> MergedCatalog {
    let mut unmatched = krakow_stars;
    let mut entries = Vec::with_capacity(gcvs_stars.len());

    for star in gcvs_stars {
        let matched = unmatched
            .iter()
            .position(|k| k.gcvs_name.eq_ignore_ascii_case(&star.name))
            .map(|i| unmatched.remove(i));

        if matched.is_none() && !ECLIPSING_TYPE_RE.is_match(&star.variable_type) {
            continue;
        }

        let mut entry = entry_from_gcvs(star);
        if let Some(krakow) = matched {
            entry.names.insert(KRAKOW_KEY.to_string(), krakow.krakow_name);
            entry.epoch = krakow.epoch;
            entry.period = krakow.period;
        }
        entries.push(entry);
    }

    entries.retain(|entry| entry.period != 0.0);

    MergedCatalog { entries, unmatched }
}

/// Read both catalogue files, merge them and write the JSON catalog.
///
/// Arguments
/// -----------------
/// * `gcvs_path`: the GCVS catalogue.
/// * `krakow_path`: the Krakow ephemeris list.
/// * `output`: destination JSON file.
///
/// Return
/// ----------
/// * The number of entries written. Unmatched Krakow records are logged as warnings.
pub fn build_catalog(
    gcvs_path: &Utf8Path,
    krakow_path: &Utf8Path,
    output: &Utf8Path,
) -> Result<usize, PredictorError> {
    let gcvs_stars = read_gcvs_file(gcvs_path)?;
    let krakow_stars = read_krakow_file(krakow_path)?;

    let merged = merge_catalogs(gcvs_stars, krakow_stars);
    if !merged.unmatched.is_empty() {
        let names: Vec<&str> = merged
            .unmatched
            .iter()
            .map(|k| k.krakow_name.as_str())
            .collect();
        log::warn!("Krakow stars not merged: {}", names.join(", "));
    }

    write_catalog(output, &merged.entries)?;
    log::info!("wrote {} catalog entries to {output}", merged.entries.len());
    Ok(merged.entries.len())
}
