//! # Constants and type definitions for the eclipse predictor
//!
//! This module centralizes the **time anchors**, **conversion factors**, and **type aliases**
//! shared by the time converter, the horizontal-coordinate engine and the eclipse search.
//!
//! ## Overview
//!
//! - Julian Date anchor and day lengths
//! - Sidereal-time polynomial coefficients (IAU 1982)
//! - Unit conversions (degrees ↔ radians, hours → radians)
//! - Search thresholds (fast-varying period limit, azimuth singularity guard)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Time anchors and day lengths
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Julian Date attached to the civil anchor [`ANCHOR_CIVIL_DATE`]
pub const J2000_JD: JulianDate = 2451545.0;

/// Civil wall-clock date `(year, month, day, hour)` mapped onto [`J2000_JD`]
pub const ANCHOR_CIVIL_DATE: (i32, u8, u8, u8) = (2000, 2, 1, 12);

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Number of milliseconds in a day
pub const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Sidereal time
// -------------------------------------------------------------------------------------------------

/// GMST polynomial coefficients, in seconds of time (IAU 1982)
pub const GMST_C0: f64 = 24110.54841;
pub const GMST_C1: f64 = 8640184.812866;
pub const GMST_C2: f64 = 0.093104;
pub const GMST_C3: f64 = -0.0000062;

/// Ratio of the mean solar day to the sidereal day
pub const SIDEREAL_DAY_RATIO: f64 = 1.0027379093;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

// -------------------------------------------------------------------------------------------------
// Search thresholds
// -------------------------------------------------------------------------------------------------

/// Periods at or below this many days are treated as fast-varying sources
pub const FAST_PERIOD_THRESHOLD: Day = 0.2;

/// Below this value of `cos(alt)·cos(lat)` the azimuth is undefined and falls back to north
pub const AZIMUTH_SINGULARITY_EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Continuous day count (Julian Date)
pub type JulianDate = f64;
/// Duration in days
pub type Day = f64;
/// Apparent visual magnitude (lower is brighter)
pub type Magnitude = f64;
