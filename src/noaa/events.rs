//! Sunrise, sunset and solar noon.
//!
//! Events are found with the closed-form hour angle of the sun at a zenith of
//! 90.833° (the standard horizon including refraction and the solar disc),
//! refined once at the estimated instant. Days without a crossing (polar day
//! or polar night) are resolved by stepping whole days until one is found.

use crate::error::{check_julian_day, check_latitude, check_longitude, check_timezone};
use crate::math::{
    MINUTES_PER_DAY, acos, cos, degrees_to_radians, floor, mul_add, normalize_degrees_signed,
    normalize_minutes_of_day, radians_to_degrees, tan,
};
use crate::time::{day_of_year_from_julian_day, julian_century};
use crate::types::{EventTime, SunEvent};
use crate::Result;

use super::{SolarSeries, equation_of_time, geometry::horizontal_position};

/// Zenith angle of the sun at sunrise and sunset in degrees.
pub const SUNRISE_ZENITH: f64 = 90.833;

/// Latitude beyond which a missing event is classified as polar day or night.
pub const POLAR_CIRCLE_LATITUDE: f64 = 66.4;

/// Upper bound on the number of days stepped when searching for the nearest event.
///
/// Within a polar circle every event recurs within a year; only the poles
/// themselves exhaust this budget.
pub const MAX_POLAR_SEARCH_DAYS: u32 = 366;

/// Which horizon crossing to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Upper limb appears on the eastern horizon
    Sunrise,
    /// Upper limb disappears on the western horizon
    Sunset,
}

/// Hour angle of sunrise in radians, or `None` when the sun does not cross
/// the 90.833° zenith circle at this latitude and declination.
fn sunrise_hour_angle(latitude: f64, declination: f64) -> Option<f64> {
    let lat_rad = degrees_to_radians(latitude);
    let dec_rad = degrees_to_radians(declination);
    let argument = mul_add(
        -tan(lat_rad),
        tan(dec_rad),
        cos(degrees_to_radians(SUNRISE_ZENITH)) / (cos(lat_rad) * cos(dec_rad)),
    );

    (-1.0..=1.0).contains(&argument).then(|| acos(argument))
}

/// UTC minutes after the midnight `julian_day` at which the event happens,
/// using the series evaluated at that midnight.
///
/// The result may lie outside [0, 1440). `longitude` must be in [-180, 180).
fn event_utc_minutes(kind: EventKind, julian_day: f64, latitude: f64, longitude: f64) -> Option<f64> {
    let series = SolarSeries::at(julian_century(julian_day));
    let hour_angle = sunrise_hour_angle(latitude, series.declination)?;
    let hour_angle = match kind {
        EventKind::Sunrise => hour_angle,
        EventKind::Sunset => -hour_angle,
    };

    let delta = longitude + radians_to_degrees(hour_angle);
    Some(mul_add(-4.0, delta, 720.0 - series.equation_of_time))
}

/// Builds the event for a UTC time found relative to `julian_day`, rolling
/// the local time into [0, 1440) and the day along with it.
fn local_event(
    julian_day: f64,
    utc_minutes: f64,
    latitude: f64,
    longitude: f64,
    timezone: f64,
) -> EventTime {
    let local_minutes = mul_add(timezone, 60.0, utc_minutes);

    let series = SolarSeries::at(julian_century(julian_day + utc_minutes / MINUTES_PER_DAY));
    let azimuth = horizontal_position(&series, local_minutes, latitude, longitude, timezone).azimuth();

    let day_shift = floor(local_minutes / MINUTES_PER_DAY);
    EventTime {
        julian_day: julian_day + day_shift,
        local_minutes: normalize_minutes_of_day(local_minutes),
        azimuth,
    }
}

/// Whether a day without the event counts as polar day (sun continuously up)
/// rather than polar night.
fn is_polar_day(latitude: f64, day_of_year: u32) -> bool {
    if latitude > POLAR_CIRCLE_LATITUDE {
        (80..267).contains(&day_of_year)
    } else if latitude < -POLAR_CIRCLE_LATITUDE {
        !(83..=263).contains(&day_of_year)
    } else {
        false
    }
}

/// Computes a sunrise or sunset for the day starting at `julian_day`.
///
/// # Arguments
/// * `kind` - sunrise or sunset
/// * `julian_day` - Julian Day at 0h UTC of the requested day
/// * `latitude` - observer latitude in degrees (-90 to +90)
/// * `longitude` - observer longitude in degrees, positive east (-540 to 540)
/// * `timezone` - hour offset of the reported local time from UTC
///
/// # Returns
/// [`SunEvent::OnDay`] when the sun crosses the horizon on that day. Otherwise
/// the nearest crossing is searched day by day: during polar day sunrise is
/// searched backward and sunset forward, during polar night the other way
/// round. The search gives up with [`SunEvent::NotFound`] after
/// [`MAX_POLAR_SEARCH_DAYS`].
///
/// # Errors
/// Returns an error for out-of-range coordinates or timezone offset, or a
/// Julian Day that is not finite.
pub fn sun_event(
    kind: EventKind,
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    timezone: f64,
) -> Result<SunEvent> {
    check_julian_day(julian_day)?;
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    check_timezone(timezone)?;
    let longitude = normalize_degrees_signed(longitude);

    let refined = event_utc_minutes(kind, julian_day, latitude, longitude).and_then(|estimate| {
        event_utc_minutes(
            kind,
            julian_day + estimate / MINUTES_PER_DAY,
            latitude,
            longitude,
        )
    });

    if let Some(utc_minutes) = refined {
        return Ok(SunEvent::OnDay(local_event(
            julian_day,
            utc_minutes,
            latitude,
            longitude,
            timezone,
        )));
    }

    let polar_day = is_polar_day(latitude, day_of_year_from_julian_day(julian_day)?);
    let forward = match kind {
        EventKind::Sunrise => !polar_day,
        EventKind::Sunset => polar_day,
    };
    let step = if forward { 1.0 } else { -1.0 };
    log::debug!(
        "no {kind:?} on JD {julian_day} at latitude {latitude}; searching {} (polar {})",
        if forward { "forward" } else { "backward" },
        if polar_day { "day" } else { "night" },
    );

    for days in 0..=MAX_POLAR_SEARCH_DAYS {
        let day = mul_add(step, f64::from(days), julian_day);
        if let Some(utc_minutes) = event_utc_minutes(kind, day, latitude, longitude) {
            return Ok(SunEvent::Nearest {
                event: local_event(day, utc_minutes, latitude, longitude, timezone),
                polar_day,
            });
        }
    }

    log::warn!(
        "no {kind:?} within {MAX_POLAR_SEARCH_DAYS} days of JD {julian_day} at latitude {latitude}"
    );
    Ok(SunEvent::NotFound { polar_day })
}

/// Computes the sunrise for the day starting at `julian_day`.
///
/// See [`sun_event`].
///
/// # Errors
/// Returns an error for out-of-range coordinates.
///
/// # Example
/// ```
/// use solar_calculator::noaa::sunrise;
///
/// // 2021-05-26, Salt Lake City, reported in UTC-6
/// let event = sunrise(2_459_360.5, 40.77, -111.89, -6.0).unwrap();
/// let time = event.event().unwrap();
/// assert_eq!(time.local_hms(), (6, 1, 24));
/// ```
pub fn sunrise(julian_day: f64, latitude: f64, longitude: f64, timezone: f64) -> Result<SunEvent> {
    sun_event(EventKind::Sunrise, julian_day, latitude, longitude, timezone)
}

/// Computes the sunset for the day starting at `julian_day`.
///
/// See [`sun_event`].
///
/// # Errors
/// Returns an error for out-of-range coordinates.
pub fn sunset(julian_day: f64, latitude: f64, longitude: f64, timezone: f64) -> Result<SunEvent> {
    sun_event(EventKind::Sunset, julian_day, latitude, longitude, timezone)
}

/// Local time of solar noon in minutes, in [0, 1440).
///
/// # Arguments
/// * `julian_day` - Julian Day at 0h UTC of the requested day
/// * `longitude` - observer longitude in degrees, positive east (-540 to 540)
/// * `timezone` - hour offset of the reported local time from UTC
///
/// # Errors
/// Returns an error for an out-of-range longitude or timezone offset, or a
/// Julian Day that is not finite.
pub fn solar_noon(julian_day: f64, longitude: f64, timezone: f64) -> Result<f64> {
    check_julian_day(julian_day)?;
    check_longitude(longitude)?;
    check_timezone(timezone)?;
    let longitude = normalize_degrees_signed(longitude);

    let first_guess = equation_of_time(julian_century(julian_day - longitude / 360.0));
    let offset = mul_add(-4.0, longitude, 720.0 - first_guess);
    let eot = equation_of_time(julian_century(julian_day + offset / MINUTES_PER_DAY));

    Ok(normalize_minutes_of_day(mul_add(
        timezone,
        60.0,
        mul_add(-4.0, longitude, 720.0 - eot),
    )))
}
