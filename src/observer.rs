//! # Observer location
//!
//! A terrestrial observing site reduced to the two angles the horizontal-coordinate transform
//! needs. Altitude above sea level, parallax and refraction are not modelled.
//!
//! ## Units
//!
//! - Constructors take **degrees** (east-positive longitude, north-positive latitude).
//! - Stored values are **radians**: longitude in `[0, 2π)`, latitude in `[-π/2, π/2]`.
use crate::constants::{Degree, Radian, RADEG};
use crate::conversion::wrap_two_pi;
use crate::predictor_errors::PredictorError;

/// Geographic position of the observer, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    longitude: Radian,
    latitude: Radian,
}

impl ObserverLocation {
    /// Build an observer from geographic coordinates in degrees.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: east-positive longitude in degrees, within `[-360, 360]`.
    /// * `latitude`: geodetic latitude in degrees, within `[-90, 90]`.
    ///
    /// Return
    /// ----------
    /// * The observer with its longitude wrapped into `[0, 2π)`, or
    ///   [`PredictorError::InvalidSearchParameter`] when an angle is out of range or not finite.
    pub fn new(longitude: Degree, latitude: Degree) -> Result<Self, PredictorError> {
        if !(-360.0..=360.0).contains(&longitude) {
            return Err(PredictorError::InvalidSearchParameter(format!(
                "longitude must be within [-360, 360] degrees, got {longitude}"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PredictorError::InvalidSearchParameter(format!(
                "latitude must be within [-90, 90] degrees, got {latitude}"
            )));
        }
        Ok(Self::from_radians(longitude * RADEG, latitude * RADEG))
    }

    /// Build an observer directly from radians; the longitude is wrapped into `[0, 2π)`.
    pub fn from_radians(longitude: Radian, latitude: Radian) -> Self {
        ObserverLocation {
            longitude: wrap_two_pi(longitude),
            latitude,
        }
    }

    pub fn longitude(&self) -> Radian {
        self.longitude
    }

    pub fn latitude(&self) -> Radian {
        self.latitude
    }
}
