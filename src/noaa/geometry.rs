//! Observer geometry: hour angle, zenith, azimuth and atmospheric refraction.

use crate::math::{
    acos, clamp_unit, cos, degrees_to_radians, mul_add, normalize_degrees_0_to_360,
    normalize_minutes_of_day, polynomial, radians_to_degrees, sin, tan,
};
use crate::types::HorizontalPosition;

use super::SolarSeries;

/// Below this value of `cos(latitude)·sin(zenith)` the azimuth is undefined
/// (observer at a pole or sun at zenith/nadir).
const AZIMUTH_DENOMINATOR_LIMIT: f64 = 0.001;

/// Atmospheric refraction at exoatmospheric elevation `elevation`, in degrees.
///
/// Piecewise empirical fit used by the NOAA calculator:
/// - above 85° refraction is ignored
/// - 5° to 85°: rational polynomial in the cotangent of the elevation
/// - -0.575° to 5°: quartic polynomial in the elevation
/// - below -0.575°: `-20.774 / tan(e)`
#[must_use]
pub fn refraction_correction(elevation: f64) -> f64 {
    if elevation > 85.0 {
        return 0.0;
    }

    let te = tan(degrees_to_radians(elevation));
    let arcseconds = if elevation > 5.0 {
        // odd series in cot(e)
        polynomial(&[0.0, 58.1, 0.0, -0.07, 0.0, 0.000086], 1.0 / te)
    } else if elevation > -0.575 {
        polynomial(&[1735.0, -518.2, 103.4, -12.79, 0.711], elevation)
    } else {
        -20.774 / te
    };

    arcseconds / 3600.0
}

/// Hour angle of the sun in degrees, in [-180, 180).
///
/// `local_minutes` is the local clock time of day; `timezone` the hour offset
/// of that clock from UTC.
#[must_use]
pub fn hour_angle(local_minutes: f64, longitude: f64, timezone: f64, equation_of_time: f64) -> f64 {
    let true_solar_time = normalize_minutes_of_day(mul_add(
        4.0,
        longitude,
        mul_add(-60.0, timezone, local_minutes + equation_of_time),
    ));
    true_solar_time / 4.0 - 180.0
}

/// Azimuth and refraction-corrected elevation of the sun.
///
/// # Arguments
/// * `series` - declination and equation of time for the instant
/// * `local_minutes` - local time of day in minutes
/// * `latitude` - observer latitude in degrees
/// * `longitude` - observer longitude in degrees, positive east (any branch)
/// * `timezone` - hour offset of the local clock from UTC
///
/// # Example
/// ```
/// use solar_calculator::noaa::{SolarSeries, horizontal_position};
/// use solar_calculator::CalendarTime;
///
/// let time = CalendarTime::from_epoch_seconds(1_622_042_345).unwrap();
/// let series = SolarSeries::at(time.julian_century());
/// let position = horizontal_position(&series, time.minutes_of_day(), 40.77, 248.11, 0.0);
/// assert!((position.elevation() - 35.09).abs() < 0.01);
/// ```
#[must_use]
pub fn horizontal_position(
    series: &SolarSeries,
    local_minutes: f64,
    latitude: f64,
    longitude: f64,
    timezone: f64,
) -> HorizontalPosition {
    let hour_angle = hour_angle(local_minutes, longitude, timezone, series.equation_of_time);

    let lat_rad = degrees_to_radians(latitude);
    let dec_rad = degrees_to_radians(series.declination);
    let (sin_lat, cos_lat) = (sin(lat_rad), cos(lat_rad));
    let sin_dec = sin(dec_rad);
    let cos_zenith = clamp_unit(mul_add(
        sin_lat,
        sin_dec,
        cos_lat * cos(dec_rad) * cos(degrees_to_radians(hour_angle)),
    ));
    let zenith = radians_to_degrees(acos(cos_zenith));
    let zenith_rad = degrees_to_radians(zenith);

    let azimuth_denominator = cos_lat * sin(zenith_rad);
    let azimuth = if azimuth_denominator.abs() > AZIMUTH_DENOMINATOR_LIMIT {
        let cos_azimuth =
            clamp_unit(mul_add(sin_lat, cos(zenith_rad), -sin_dec) / azimuth_denominator);
        let azimuth = 180.0 - radians_to_degrees(acos(cos_azimuth));
        if hour_angle > 0.0 { -azimuth } else { azimuth }
    } else if latitude > 0.0 {
        180.0
    } else {
        0.0
    };

    let exoatmospheric_elevation = 90.0 - zenith;
    let refracted_zenith = zenith - refraction_correction(exoatmospheric_elevation);

    HorizontalPosition::new(
        normalize_degrees_0_to_360(azimuth),
        90.0 - refracted_zenith,
    )
}
