//! # Eclipse search
//!
//! Scan a catalog for eclipses (or extrema) that both happen inside the search window and are
//! observable from the observer's site.
//!
//! ## Per-entry pipeline
//!
//! ```text
//! CatalogEntry ──filter──► mid instant ──window──► mid EventPoint ──altitude──►
//!             start/end EventPoints ──altitude──► SearchResult
//! ```
//!
//! 1. **Filter**: [`CatalogEntry::passes`] (magnitude, and period validity in
//!    [`SearchMode::Standard`]).
//! 2. **Mid instant**: in standard mode the first `epoch + n·period ≥ window_start`
//!    ([`first_event_at_or_after`]); fast-varying entries (period ≤ 0.2 d) and every entry in
//!    [`SearchMode::Fast`] use the window midpoint instead and are flagged `fast`.
//! 3. **Window**: a propagated event with a duration must fit entirely inside the window;
//!    any other event is a point that must lie inside it.
//! 4. **Observability**: the mid point is checked first, then start and end. An entry is
//!    kept only if every computed point reaches the minimum altitude.
//!
//! Rejections are silent for the caller (logged at `trace`). The output keeps catalog order
//! and depends only on the inputs.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::catalog::CatalogEntry;
use crate::constants::{Day, JulianDate, Magnitude};
use crate::conversion::rad_to_deg;
use crate::horizon::{event_point, EventPoint};
use crate::search_params::{SearchMode, SearchParams};
use crate::time::{epoch_from_julian_date, format_timestamp};

/// Start, middle and end of one event. Point events have no start and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseWindow {
    pub start: Option<EventPoint>,
    pub mid: EventPoint,
    pub end: Option<EventPoint>,
}

/// One observable event of a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub names: BTreeMap<String, String>,
    pub variable_type: String,
    pub minimum_magnitude: Magnitude,
    pub maximum_magnitude: Magnitude,
    pub spectral_type: String,
    pub window: EclipseWindow,
    /// The mid instant is the window midpoint, not a propagated event
    pub fast: bool,
}

#[derive(Serialize)]
struct PointView {
    date: String,
    altitude: f64,
    azimuth: f64,
}

impl From<&EventPoint> for PointView {
    fn from(point: &EventPoint) -> Self {
        PointView {
            date: format_timestamp(&epoch_from_julian_date(point.instant)),
            altitude: rad_to_deg(point.altitude),
            azimuth: rad_to_deg(point.azimuth),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultView<'a> {
    names: &'a BTreeMap<String, String>,
    #[serde(rename = "type")]
    variable_type: &'a str,
    minimum_magnitude: Magnitude,
    maximum_magnitude: Magnitude,
    start_eclipse: Option<PointView>,
    mid_eclipse: PointView,
    end_eclipse: Option<PointView>,
    spectral_type: &'a str,
    fast: bool,
}

/// Timestamps as ISO-8601 wall-clock strings, angles in degrees, missing points as `null`.
///
/// Dates read `YYYY-MM-DDTHH:MM:SS.mmm` with no zone suffix: they carry the same wall clock
/// as the request dates. Consumers used to UTC `Z`-suffixed dates must not append one, since
/// the instant was never shifted to UTC.
impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SearchResultView {
            names: &self.names,
            variable_type: &self.variable_type,
            minimum_magnitude: self.minimum_magnitude,
            maximum_magnitude: self.maximum_magnitude,
            start_eclipse: self.window.start.as_ref().map(PointView::from),
            mid_eclipse: PointView::from(&self.window.mid),
            end_eclipse: self.window.end.as_ref().map(PointView::from),
            spectral_type: &self.spectral_type,
            fast: self.fast,
        }
        .serialize(serializer)
    }
}

/// Why an entry was left out of the results.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rejection {
    Filtered,
    OutsideWindow,
    BelowMinimumAltitude(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Filtered => write!(f, "magnitude or period filter"),
            Rejection::OutsideWindow => write!(f, "event outside the search window"),
            Rejection::BelowMinimumAltitude(which) => {
                write!(f, "{which} point below the minimum altitude")
            }
        }
    }
}

/// First periodic occurrence at or after `start`.
///
/// Arguments
/// -----------------
/// * `epoch`: reference occurrence.
/// * `period`: strictly positive period, in days.
/// * `start`: lower bound.
///
/// Return
/// ----------
/// * `epoch + n·period` for the smallest `n ≥ 0` reaching `start`. The count is computed in
///   closed form, then corrected by one step if rounding landed on the wrong side.
pub fn first_event_at_or_after(epoch: JulianDate, period: Day, start: JulianDate) -> JulianDate {
    if epoch >= start {
        return epoch;
    }

    let mut n = ((start - epoch) / period).ceil().max(0.0);
    if n > 0.0 && epoch + (n - 1.0) * period >= start {
        n -= 1.0;
    }
    if epoch + n * period < start {
        n += 1.0;
    }
    epoch + n * period
}

/// Mid instant of the next event, and whether it is the representative window midpoint.
fn mid_instant(entry: &CatalogEntry, params: &SearchParams) -> (JulianDate, bool) {
    match params.mode() {
        SearchMode::Fast => (params.window_midpoint(), true),
        SearchMode::Standard if entry.is_fast_varying() => (params.window_midpoint(), true),
        SearchMode::Standard => (
            first_event_at_or_after(entry.epoch, entry.period, params.window_start()),
            false,
        ),
    }
}

fn observable(point: &EventPoint, params: &SearchParams) -> bool {
    point.altitude >= params.min_altitude()
}

/// Run the per-entry pipeline for one catalog entry.
fn evaluate(entry: &CatalogEntry, params: &SearchParams) -> Result<SearchResult, Rejection> {
    if !entry.passes(params) {
        return Err(Rejection::Filtered);
    }

    let (mid, fast) = mid_instant(entry, params);
    let half_duration = if !fast && entry.eclipse_time > 0.0 {
        Some(entry.eclipse_time / 2.0)
    } else {
        None
    };

    match half_duration {
        Some(half) => {
            if mid - half < params.window_start() || mid + half > params.window_end() {
                return Err(Rejection::OutsideWindow);
            }
        }
        None => {
            if mid < params.window_start() || mid > params.window_end() {
                return Err(Rejection::OutsideWindow);
            }
        }
    }

    let point = |jd: JulianDate| {
        event_point(
            jd,
            params.observer(),
            entry.right_ascension,
            entry.declination,
        )
    };

    let mid_point = point(mid);
    if !observable(&mid_point, params) {
        return Err(Rejection::BelowMinimumAltitude("mid"));
    }

    let (start, end) = match half_duration {
        Some(half) => {
            let start = point(mid - half);
            if !observable(&start, params) {
                return Err(Rejection::BelowMinimumAltitude("start"));
            }
            let end = point(mid + half);
            if !observable(&end, params) {
                return Err(Rejection::BelowMinimumAltitude("end"));
            }
            (Some(start), Some(end))
        }
        None => (None, None),
    };

    Ok(SearchResult {
        names: entry.names.clone(),
        variable_type: entry.variable_type.clone(),
        minimum_magnitude: entry.minimum_magnitude,
        maximum_magnitude: entry.maximum_magnitude,
        spectral_type: entry.spectral_type.clone(),
        window: EclipseWindow {
            start,
            mid: mid_point,
            end,
        },
        fast,
    })
}

/// Find the observable events of a catalog inside a search window.
///
/// Arguments
/// -----------------
/// * `catalog`: entries to scan, never modified.
/// * `params`: observer, thresholds, window and mode.
///
/// Return
/// ----------
/// * One [`SearchResult`] per retained entry, in catalog order.
pub fn search_eclipses(catalog: &[CatalogEntry], params: &SearchParams) -> Vec<SearchResult> {
    let results: Vec<SearchResult> = catalog
        .iter()
        .filter_map(|entry| match evaluate(entry, params) {
            Ok(result) => Some(result),
            Err(reason) => {
                log::trace!("{}: rejected ({reason})", entry.display_name());
                None
            }
        })
        .collect();

    log::debug!(
        "{} search kept {} of {} catalog entries",
        params.mode(),
        results.len(),
        catalog.len()
    );
    results
}
