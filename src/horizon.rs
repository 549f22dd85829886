//! # Sidereal time and horizontal coordinates
//!
//! Stateless functions turning an instant, an observer and equatorial coordinates into the
//! altitude/azimuth of a star as seen from the ground.
//!
//! ## Pipeline
//!
//! ```text
//! JD ──gmst──► GMST ──+longitude──► LST ──−RA──► hour angle ──(dec, lat)──► altitude, azimuth
//! ```
//!
//! ## Conventions
//!
//! - All angles are **radians**; every angle returned here lies in `[0, 2π)` except the
//!   altitude, which lies in `[-π/2, π/2]`.
//! - Azimuth is measured from north. The `acos` branch is mirrored to `2π − az` when
//!   `sin(hour angle) ≥ 0`.
//! - Equatorial coordinates are used as given (no precession, nutation, aberration or
//!   refraction).
//!
//! ## Singularities
//!
//! When `cos(altitude)·cos(latitude)` falls below [`AZIMUTH_SINGULARITY_EPS`] (star at the
//! zenith or nadir, or observer on a pole) the azimuth is not defined. [`azimuth`] then
//! returns `0` (north) instead of propagating a NaN. Arguments of `asin`/`acos` are clamped
//! into `[-1, 1]` so rounding never produces a NaN either.
use crate::constants::{
    JulianDate, Radian, AZIMUTH_SINGULARITY_EPS, DAYS_PER_CENTURY, DPI, GMST_C0, GMST_C1,
    GMST_C2, GMST_C3, J2000_JD, RADH, SECONDS_PER_DAY, SECONDS_PER_HOUR, SIDEREAL_DAY_RATIO,
};
use crate::conversion::wrap_two_pi;
use crate::observer::ObserverLocation;

/// Observable geometry of a star at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPoint {
    pub instant: JulianDate,
    pub altitude: Radian,
    pub azimuth: Radian,
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians for a Julian Date.
///
/// The IAU 1982 cubic gives the sidereal time at the half-integer Julian Date preceding
/// `jd`; the elapsed fraction of the day is then added at the sidereal rate.
///
/// Arguments
/// -----------------
/// * `jd`: the instant as a Julian Date
///
/// Return
/// ----------
/// * GMST angle in radians, in `[0, 2π)`
///
/// Details
/// ----------
/// 1. `p = jd mod 1`, shifted by half a day (`p − 0.5` when `p > 0.5`, else `p + 0.5`) so that
///    `jd − p` is the preceding 0h boundary.
/// 2. `T = (jd − p − 2451545.0) / 36525` centuries.
/// 3. `s = 24110.54841 + 8640184.812866·T + 0.093104·T² − 0.0000062·T³ + p·1.0027379093·86400`.
/// 4. `s` is reduced into one day (euclidean remainder, so instants before 2000 stay
///    positive), then converted seconds → hours → radians.
pub fn gmst(jd: JulianDate) -> Radian {
    let mut part_day = jd.rem_euclid(1.0);
    if part_day > 0.5 {
        part_day -= 0.5;
    } else {
        part_day += 0.5;
    }

    let t = (jd - part_day - J2000_JD) / DAYS_PER_CENTURY;

    let mut seconds = ((GMST_C3 * t + GMST_C2) * t + GMST_C1) * t + GMST_C0;
    seconds += part_day * SIDEREAL_DAY_RATIO * SECONDS_PER_DAY;
    let seconds = seconds.rem_euclid(SECONDS_PER_DAY);

    wrap_two_pi(seconds / SECONDS_PER_HOUR * RADH)
}

/// Local sidereal time for an east-positive longitude, in `[0, 2π)`.
pub fn local_sidereal_time(jd: JulianDate, longitude: Radian) -> Radian {
    wrap_two_pi(gmst(jd) + longitude)
}

/// Hour angle of a right ascension at an instant and longitude, in `[0, 2π)`.
///
/// The difference `LST − RA` is fully normalized, so right ascensions outside one turn are
/// accepted.
pub fn hour_angle(jd: JulianDate, longitude: Radian, right_ascension: Radian) -> Radian {
    wrap_two_pi(local_sidereal_time(jd, longitude) - right_ascension)
}

/// Altitude above the horizon, in `[-π/2, π/2]`.
///
/// Arguments
/// -----------------
/// * `hour_angle`: hour angle of the star
/// * `declination`: declination of the star
/// * `latitude`: latitude of the observer
pub fn altitude(hour_angle: Radian, declination: Radian, latitude: Radian) -> Radian {
    let sin_alt = declination.sin() * latitude.sin()
        + declination.cos() * latitude.cos() * hour_angle.cos();
    sin_alt.clamp(-1.0, 1.0).asin()
}

/// Azimuth measured from north, in `[0, 2π)`.
///
/// Arguments
/// -----------------
/// * `hour_angle`: hour angle of the star
/// * `declination`: declination of the star
/// * `latitude`: latitude of the observer
/// * `altitude`: altitude returned by [`altitude`] for the same inputs
///
/// Return
/// ----------
/// * The azimuth, or `0` when `cos(altitude)·cos(latitude)` is below
///   [`AZIMUTH_SINGULARITY_EPS`] (zenith, nadir or polar observer).
pub fn azimuth(
    hour_angle: Radian,
    declination: Radian,
    latitude: Radian,
    altitude: Radian,
) -> Radian {
    let denominator = altitude.cos() * latitude.cos();
    if denominator.abs() < AZIMUTH_SINGULARITY_EPS {
        return 0.0;
    }

    let cos_az = (declination.sin() - altitude.sin() * latitude.sin()) / denominator;
    let mut az = cos_az.clamp(-1.0, 1.0).acos();

    if hour_angle.sin() >= 0.0 {
        az = DPI - az;
    }

    wrap_two_pi(az)
}

/// Compute the [`EventPoint`] of a star for one instant and observer.
///
/// Arguments
/// -----------------
/// * `jd`: instant of the event
/// * `observer`: observing site
/// * `right_ascension`, `declination`: equatorial coordinates of the star
pub fn event_point(
    jd: JulianDate,
    observer: &ObserverLocation,
    right_ascension: Radian,
    declination: Radian,
) -> EventPoint {
    let ha = hour_angle(jd, observer.longitude(), right_ascension);
    let alt = altitude(ha, declination, observer.latitude());
    let az = azimuth(ha, declination, observer.latitude(), alt);

    EventPoint {
        instant: jd,
        altitude: alt,
        azimuth: az,
    }
}

#[cfg(test)]
mod horizon_test {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::RADEG;

    /// One arcsecond in radians
    const ARCSEC: f64 = PI / 648_000.0;

    #[test]
    fn test_gmst_at_j2000() {
        // 18h41m50.5s
        let expected = 18.697_374_557_723_79 * RADH;
        assert_relative_eq!(gmst(J2000_JD), expected, epsilon = ARCSEC);
        assert_relative_eq!(gmst(J2000_JD), 4.894961212663481, epsilon = 1e-9);
    }

    #[test]
    fn test_gmst_reference_values() {
        assert_relative_eq!(gmst(2451545.25), 0.1868729301503295, epsilon = 1e-9);
        assert_relative_eq!(gmst(2460000.7), 3.958390587632438, epsilon = 1e-9);
        assert_relative_eq!(gmst(2447892.5), 1.7520246295705626, epsilon = 1e-9);
    }

    #[test]
    fn test_gmst_range() {
        let mut jd = 2_415_020.0;
        while jd < 2_488_070.0 {
            let value = gmst(jd);
            assert!((0.0..DPI).contains(&value), "gmst({jd}) = {value}");
            jd += 97.37;
        }
    }

    #[test]
    fn test_local_sidereal_time_wraps() {
        let lst = local_sidereal_time(J2000_JD, 3.0);
        assert_relative_eq!(lst, gmst(J2000_JD) + 3.0 - DPI, epsilon = 1e-12);
    }

    #[test]
    fn test_hour_angle_range() {
        for ra in [-7.0, -0.1, 0.0, 1.0, 6.2, 12.9] {
            let ha = hour_angle(2459000.3, 1.0, ra);
            assert!((0.0..DPI).contains(&ha), "ha = {ha} for ra = {ra}");
        }
        let lst = local_sidereal_time(2459000.3, 1.0);
        assert_relative_eq!(hour_angle(2459000.3, 1.0, lst), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_altitude_at_zenith() {
        let lat = 51.5 * RADEG;
        assert_relative_eq!(altitude(0.0, lat, lat), FRAC_PI_2, epsilon = 1e-7);
    }

    #[test]
    fn test_altitude_range() {
        for ha in [0.0, 1.0, 3.0, 5.5] {
            for dec in [-1.5, -0.3, 0.0, 0.7, 1.5] {
                let alt = altitude(ha, dec, 0.9);
                assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&alt));
            }
        }
    }

    #[test]
    fn test_azimuth_on_meridian() {
        let lat = 50.0 * RADEG;
        let dec = 20.0 * RADEG;
        let alt = altitude(0.0, dec, lat);
        assert_relative_eq!(alt, 60.0 * RADEG, epsilon = 1e-12);
        assert_relative_eq!(azimuth(0.0, dec, lat, alt), PI, epsilon = 1e-6);
    }

    #[test]
    fn test_azimuth_east_west() {
        let lat = 50.0 * RADEG;
        let dec = 20.0 * RADEG;

        // positive hour angle: past the meridian, western sky
        let ha = 2.0 * RADH;
        let west = azimuth(ha, dec, lat, altitude(ha, dec, lat));
        assert!(west > PI && west < DPI);

        // the mirrored hour angle lands on the eastern side
        let ha = DPI - 2.0 * RADH;
        let east = azimuth(ha, dec, lat, altitude(ha, dec, lat));
        assert!(east > 0.0 && east < PI);
        assert_relative_eq!(east + west, DPI, epsilon = 1e-9);
    }

    #[test]
    fn test_azimuth_singularities() {
        // star at the zenith
        let lat = 30.0 * RADEG;
        let alt = altitude(0.0, lat, lat);
        let az = azimuth(0.0, lat, lat, alt);
        assert!(!az.is_nan());
        assert!((0.0..DPI).contains(&az));

        // observer on the north pole
        assert_eq!(azimuth(1.0, 0.4, FRAC_PI_2, 0.4), 0.0);
    }

    #[test]
    fn test_event_point() {
        let site = ObserverLocation::new(0.0, 51.5).unwrap();
        let point = event_point(2459000.3, &site, 1.2, 0.5);
        assert_eq!(point.instant, 2459000.3);
        let ha = hour_angle(2459000.3, 0.0, 1.2);
        assert_eq!(point.altitude, altitude(ha, 0.5, site.latitude()));
        assert!((0.0..DPI).contains(&point.azimuth));
    }
}
