//! # Calendar timestamps ⇄ Julian Date
//!
//! Timestamps are [`hifitime::Epoch`] values read as **wall-clock labels**: the caller decides
//! which local time they represent, and the conversion never applies a timezone or a leap
//! second. The mapping is linear, anchored on the civil date
//! [`ANCHOR_CIVIL_DATE`] ↔ [`J2000_JD`], with a fixed-length day of 86 400 000 ms.
//!
//! Timestamps carry **millisecond** resolution; sub-millisecond parts are rounded away on
//! entry so that `epoch_from_julian_date(julian_date(t)) == t` holds exactly.
use hifitime::{Duration, Epoch};

use crate::constants::{JulianDate, ANCHOR_CIVIL_DATE, J2000_JD, MILLISECONDS_PER_DAY};

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Wall-clock epoch attached to [`J2000_JD`].
pub fn anchor_epoch() -> Epoch {
    let (year, month, day, hour) = ANCHOR_CIVIL_DATE;
    Epoch::from_gregorian_utc_hms(year, month, day, hour, 0, 0)
}

/// Whole milliseconds elapsed between the anchor and `epoch`, rounded to the nearest one.
fn milliseconds_since_anchor(epoch: &Epoch) -> i128 {
    let nanos = (epoch.to_utc_duration() - anchor_epoch().to_utc_duration()).total_nanoseconds();
    let millis = nanos.div_euclid(NANOS_PER_MILLI);
    if nanos.rem_euclid(NANOS_PER_MILLI) * 2 >= NANOS_PER_MILLI {
        millis + 1
    } else {
        millis
    }
}

/// Convert a wall-clock timestamp to a Julian Date.
///
/// Arguments
/// ---------
/// * `epoch`: the calendar timestamp, read in the UTC scale as a wall-clock label
///
/// Return
/// ------
/// * the Julian Date of the timestamp
pub fn julian_date(epoch: &Epoch) -> JulianDate {
    J2000_JD + milliseconds_since_anchor(epoch) as f64 / MILLISECONDS_PER_DAY
}

/// Convert a Julian Date back to a wall-clock timestamp, rounded to the millisecond.
///
/// Arguments
/// ---------
/// * `jd`: a Julian Date
///
/// Return
/// ------
/// * the calendar timestamp, exact inverse of [`julian_date`]
pub fn epoch_from_julian_date(jd: JulianDate) -> Epoch {
    let millis = ((jd - J2000_JD) * MILLISECONDS_PER_DAY).round() as i128;
    let offset = Duration::from_total_nanoseconds(millis * NANOS_PER_MILLI);
    Epoch::from_utc_duration(anchor_epoch().to_utc_duration() + offset)
}

/// Render a timestamp as an ISO-8601 wall-clock string with millisecond precision.
///
/// The output never carries a timezone suffix, mirroring the wall-clock semantics of
/// [`julian_date`].
pub fn format_timestamp(epoch: &Epoch) -> String {
    let (y, m, d, hh, mm, ss, nanos) = epoch.to_gregorian_utc();
    format!(
        "{y:04}-{m:02}-{d:02}T{hh:02}:{mm:02}:{ss:02}.{:03}",
        nanos / 1_000_000
    )
}

/// Default observing night starting on the civil date of `date`.
///
/// The night runs from 20:00 on that date to 05:00 on the following day. The date is
/// explicit so that no search ever depends on the current clock.
///
/// Arguments
/// ---------
/// * `date`: any timestamp on the civil date the night starts
///
/// Return
/// ------
/// * `(start, end)` Julian Dates of the night
pub fn night_window(date: &Epoch) -> (JulianDate, JulianDate) {
    let (y, m, d, _, _, _, _) = date.to_gregorian_utc();
    let start = julian_date(&Epoch::from_gregorian_utc_hms(y, m, d, 20, 0, 0));
    let morning = julian_date(&Epoch::from_gregorian_utc_hms(y, m, d, 5, 0, 0));
    (start, morning + 1.0)
}
