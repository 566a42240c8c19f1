//! NOAA solar position algorithm.
//!
//! Low-order series from Meeus, "Astronomical Algorithms", as used by the NOAA
//! Global Monitoring Laboratory solar calculator. Every series below is a pure
//! function of the Julian century `t` since J2000.0 (see
//! [`julian_century`](crate::time::julian_century)). Accuracy is about 0.01°
//! in position for dates between 1800 and 2100 and degrades outside that range.
//!
//! The observer-dependent parts live in [`geometry`] (azimuth, elevation,
//! refraction) and [`events`] (sunrise, sunset, solar noon).

#![allow(clippy::unreadable_literal)]

use crate::math::{
    asin, cos, degrees_to_radians, mul_add, normalize_degrees_0_to_360, polynomial,
    radians_to_degrees, sin, tan,
};

pub mod events;
pub mod geometry;

pub use events::{
    EventKind, MAX_POLAR_SEARCH_DAYS, POLAR_CIRCLE_LATITUDE, SUNRISE_ZENITH, solar_noon, sun_event,
    sunrise, sunset,
};
pub use geometry::{horizontal_position, refraction_correction};

/// Longitude of the Moon's ascending node in degrees (drives the nutation terms).
fn ascending_node(t: f64) -> f64 {
    polynomial(&[125.04, -1934.136], t)
}

/// Eccentricity of Earth's orbit (unitless).
#[must_use]
pub fn eccentricity(t: f64) -> f64 {
    polynomial(&[0.016708634, -0.000042037, -0.0000001267], t)
}

/// Mean obliquity of the ecliptic in degrees.
#[must_use]
pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = polynomial(&[21.448, -46.8150, -0.00059, 0.001813], t);
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity of the ecliptic corrected for the precession of the Moon's
/// ascending node, in degrees.
#[must_use]
pub fn obliquity_correction(t: f64) -> f64 {
    mul_add(0.00256, cos(degrees_to_radians(ascending_node(t))), mean_obliquity(t))
}

/// Geometric mean longitude of the sun in degrees, in [0, 360).
#[must_use]
pub fn geom_mean_longitude(t: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(&[280.46646, 36000.76983, 0.0003032], t))
}

/// Geometric mean anomaly of the sun in degrees, in [0, 360).
#[must_use]
pub fn geom_mean_anomaly(t: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(&[357.52911, 35999.05029, -0.0001537], t))
}

/// Equation of center of the sun in degrees.
#[must_use]
pub fn equation_of_center(t: f64) -> f64 {
    let m = degrees_to_radians(geom_mean_anomaly(t));
    mul_add(
        sin(m),
        polynomial(&[1.914602, -0.004817, -0.000014], t),
        mul_add(
            sin(2.0 * m),
            polynomial(&[0.019993, -0.000101], t),
            sin(3.0 * m) * 0.000289,
        ),
    )
}

/// True longitude of the sun in degrees.
#[must_use]
pub fn true_longitude(t: f64) -> f64 {
    geom_mean_longitude(t) + equation_of_center(t)
}

/// Apparent longitude of the sun in degrees (nutation and aberration applied).
#[must_use]
pub fn apparent_longitude(t: f64) -> f64 {
    mul_add(
        -0.00478,
        sin(degrees_to_radians(ascending_node(t))),
        true_longitude(t) - 0.00569,
    )
}

/// Declination of the sun in degrees.
#[must_use]
pub fn declination(t: f64) -> f64 {
    let epsilon = degrees_to_radians(obliquity_correction(t));
    let lambda = degrees_to_radians(normalize_degrees_0_to_360(apparent_longitude(t)));
    radians_to_degrees(asin(sin(epsilon) * sin(lambda)))
}

/// Equation of time in minutes (apparent minus mean solar time).
#[must_use]
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = degrees_to_radians(obliquity_correction(t));
    let l0 = degrees_to_radians(geom_mean_longitude(t));
    let e = eccentricity(t);
    let m = degrees_to_radians(geom_mean_anomaly(t));

    let y = tan(epsilon / 2.0);
    let y = y * y;
    let sin_m = sin(m);

    // (coefficient, periodic factor) pairs of the Smart series
    let e_time = [
        (y, sin(2.0 * l0)),
        (-2.0 * e, sin_m),
        (4.0 * e * y * sin_m, cos(2.0 * l0)),
        (-0.5 * y * y, sin(4.0 * l0)),
        (-1.25 * e * e, sin(2.0 * m)),
    ]
    .iter()
    .fold(0.0, |sum, &(coefficient, factor)| mul_add(coefficient, factor, sum));

    radians_to_degrees(e_time) * 4.0
}

/// Declination and equation of time evaluated together.
///
/// The pair every geometry and event computation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSeries {
    /// Julian century the series were evaluated at
    pub t: f64,
    /// Solar declination in degrees
    pub declination: f64,
    /// Equation of time in minutes
    pub equation_of_time: f64,
}

impl SolarSeries {
    /// Evaluates the series at Julian century `t`.
    #[must_use]
    pub fn at(t: f64) -> Self {
        Self {
            t,
            declination: declination(t),
            equation_of_time: equation_of_time(t),
        }
    }
}
