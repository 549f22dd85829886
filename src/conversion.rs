use crate::constants::{Degree, Radian, DPI, RADEG, RADH};

/// Degrees → radians (`rad = deg·π/180`)
#[inline]
pub fn deg_to_rad(degrees: Degree) -> Radian {
    degrees * RADEG
}

/// Radians → degrees
#[inline]
pub fn rad_to_deg(radians: Radian) -> Degree {
    radians / RADEG
}

/// Reduce an angle into `[0, 2π)`.
///
/// `rem_euclid` may round a tiny negative input up to exactly `2π`; that case folds to 0.
#[inline]
pub(crate) fn wrap_two_pi(angle: Radian) -> Radian {
    let wrapped = angle.rem_euclid(DPI);
    if wrapped >= DPI {
        0.0
    } else {
        wrapped
    }
}

/// Convert a sexagesimal right ascension to radians
///
/// Arguments
/// ---------
/// * `hours`, `minutes`, `seconds`: the right ascension components, all non-negative
///
/// Returns
/// -------
/// * the right ascension in radians
pub(crate) fn hms_to_rad(hours: f64, minutes: f64, seconds: f64) -> Radian {
    (hours + minutes / 60.0 + seconds / 3600.0) * RADH
}

/// Parse a sexagesimal declination to radians
///
/// Arguments
/// ---------
/// * `degrees`: the signed degree field as written in the catalogue (e.g. `"-05"`, `"+12"`, `"-00"`)
/// * `minutes`, `seconds`: the unsigned minute and second fields
///
/// Returns
/// -------
/// * `Option<Radian>`: the declination in radians, the sign applying to the whole angle.
///   Returns `None` if a field is not a number.
pub(crate) fn parse_dms_to_rad(degrees: &str, minutes: &str, seconds: &str) -> Option<Radian> {
    let sign = if degrees.trim_start().starts_with('-') {
        -1.0
    } else {
        1.0
    };
    let d: f64 = degrees
        .trim()
        .trim_start_matches(&['-', '+'][..])
        .parse()
        .ok()?;
    let m: f64 = minutes.trim().parse().ok()?;
    let s: f64 = seconds.trim().parse().ok()?;

    Some(deg_to_rad(sign * (d + m / 60.0 + s / 3600.0)))
}
