//! The [`SolarPosition`] aggregate: a location and a UTC instant with every
//! derived solar quantity kept up to date.

#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone};

use crate::math::MINUTES_PER_DAY;
use crate::noaa::{self, SolarSeries};
use crate::time::CalendarTime;
use crate::types::{Location, SunEvent};
use crate::{Error, Result};

/// Quantities recomputed whenever both location and time are set.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Derived {
    azimuth: f64,
    elevation: f64,
    declination: f64,
    equation_of_time: f64,
    solar_noon: f64,
    sunrise_event: SunEvent,
    sunset_event: SunEvent,
    sunrise: Option<CalendarTime>,
    sunset: Option<CalendarTime>,
}

/// Sun position and events for one observer at one instant.
///
/// Starts empty. Once both a [`Location`] and a time are set every derived
/// quantity is computed immediately, and again on every later change to
/// either input. Reading a derived quantity before that fails with
/// [`ErrorKind::NotConfigured`](crate::ErrorKind::NotConfigured).
///
/// All results are for UTC: solar noon is in minutes after 0h UTC and the
/// sunrise/sunset instants are UTC times on the UTC day of the set instant.
///
/// # Example
/// ```
/// use solar_calculator::{Location, SolarPosition};
///
/// let mut sun = SolarPosition::new();
/// sun.set_location(Location::new(40.77, -111.89).unwrap()).unwrap();
/// sun.set_time(1_622_042_345).unwrap(); // 2021-05-26T15:19:05Z
///
/// assert!((sun.elevation().unwrap() - 35.09).abs() < 0.01);
/// assert!((sun.azimuth().unwrap() - 91.2).abs() < 0.1);
///
/// let sunrise = sun.sunrise().unwrap().unwrap();
/// assert_eq!((sunrise.hour(), sunrise.minute()), (12, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolarPosition {
    location: Option<Location>,
    time: Option<CalendarTime>,
    derived: Option<Derived>,
}

impl SolarPosition {
    /// Creates an empty aggregate with neither location nor time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the observer location.
    ///
    /// # Errors
    /// Returns `NotConfigured` if the location lacks a latitude or longitude;
    /// the aggregate is unchanged.
    pub fn set_location(&mut self, location: Location) -> Result<()> {
        location.latitude()?;
        location.longitude()?;
        self.location = Some(location);
        self.update()
    }

    /// The observer location.
    ///
    /// # Errors
    /// Returns `NotConfigured` if no location was set.
    pub fn location(&self) -> Result<Location> {
        self.location
            .ok_or(Error::not_configured("location not set"))
    }

    /// Whether a location is set.
    #[must_use]
    pub const fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Sets the instant as whole seconds since the Unix epoch (UTC).
    ///
    /// # Errors
    /// Returns `InvalidYear` outside the supported years; the aggregate is
    /// unchanged.
    pub fn set_time(&mut self, epoch_seconds: i64) -> Result<()> {
        self.set_calendar_time(CalendarTime::from_epoch_seconds(epoch_seconds)?)
    }

    /// The instant as whole seconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns `NotConfigured` if no time was set.
    pub fn time(&self) -> Result<i64> {
        self.calendar_time().map(|time| time.epoch_seconds())
    }

    /// Sets the instant with sub-second precision.
    ///
    /// # Errors
    /// Propagates errors from the recomputation of events.
    pub fn set_calendar_time(&mut self, time: CalendarTime) -> Result<()> {
        self.time = Some(time);
        self.update()
    }

    /// The instant as a [`CalendarTime`].
    ///
    /// # Errors
    /// Returns `NotConfigured` if no time was set.
    pub fn calendar_time(&self) -> Result<CalendarTime> {
        self.time.ok_or(Error::not_configured("time not set"))
    }

    /// Sets the instant from a timezone-aware `DateTime`.
    ///
    /// # Errors
    /// Returns an error if the instant lies outside the supported years.
    #[cfg(feature = "chrono")]
    pub fn set_datetime<Tz: TimeZone>(&mut self, datetime: &DateTime<Tz>) -> Result<()> {
        self.set_calendar_time(CalendarTime::from_datetime(datetime)?)
    }

    /// Whether a time is set.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Whether both location and time are set, i.e. derived values are available.
    #[must_use]
    pub const fn has_time_and_location(&self) -> bool {
        self.has_location() && self.has_time()
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Refraction-corrected solar elevation in degrees.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn elevation(&self) -> Result<f64> {
        self.derived().map(|derived| derived.elevation)
    }

    /// Solar azimuth in degrees, clockwise from north, in [0, 360).
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn azimuth(&self) -> Result<f64> {
        self.derived().map(|derived| derived.azimuth)
    }

    /// Solar declination in degrees.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn declination(&self) -> Result<f64> {
        self.derived().map(|derived| derived.declination)
    }

    /// Equation of time in minutes.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn equation_of_time(&self) -> Result<f64> {
        self.derived().map(|derived| derived.equation_of_time)
    }

    /// Solar noon in minutes after 0h UTC, in [0, 1440).
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn solar_noon(&self) -> Result<f64> {
        self.derived().map(|derived| derived.solar_noon)
    }

    /// Sunrise as a UTC instant truncated to the second, or `None` if no
    /// sunrise could be found.
    ///
    /// During polar day or night this is the nearest sunrise on another day.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn sunrise(&self) -> Result<Option<CalendarTime>> {
        self.derived().map(|derived| derived.sunrise)
    }

    /// Sunset as a UTC instant truncated to the second, or `None` if no
    /// sunset could be found.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn sunset(&self) -> Result<Option<CalendarTime>> {
        self.derived().map(|derived| derived.sunset)
    }

    /// Full outcome of the sunrise search, including the polar classification.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn sunrise_event(&self) -> Result<SunEvent> {
        self.derived().map(|derived| derived.sunrise_event)
    }

    /// Full outcome of the sunset search.
    ///
    /// # Errors
    /// Returns `NotConfigured` unless both location and time are set.
    pub fn sunset_event(&self) -> Result<SunEvent> {
        self.derived().map(|derived| derived.sunset_event)
    }

    fn derived(&self) -> Result<&Derived> {
        if self.location.is_none() {
            return Err(Error::not_configured("location not set"));
        }
        self.derived
            .as_ref()
            .ok_or(Error::not_configured("time not set"))
    }

    fn update(&mut self) -> Result<()> {
        self.derived = match (self.location, self.time) {
            (Some(location), Some(time)) => Some(compute(location, time)?),
            _ => None,
        };
        Ok(())
    }
}

fn compute(location: Location, time: CalendarTime) -> Result<Derived> {
    let latitude = location.latitude()?;
    let longitude = location.longitude()?;
    log::trace!("recomputing solar position for ({latitude}, {longitude}) at {time}");

    let midnight = time.julian_day_at_midnight();
    let minutes = time.minutes_of_day();
    let series = SolarSeries::at(crate::time::julian_century(
        midnight + minutes / MINUTES_PER_DAY,
    ));
    let position = noaa::horizontal_position(&series, minutes, latitude, longitude, 0.0);

    let sunrise_event = noaa::sunrise(midnight, latitude, longitude, 0.0)?;
    let sunset_event = noaa::sunset(midnight, latitude, longitude, 0.0)?;

    Ok(Derived {
        azimuth: position.azimuth(),
        elevation: position.elevation(),
        declination: series.declination,
        equation_of_time: series.equation_of_time,
        solar_noon: noaa::solar_noon(midnight, longitude, 0.0)?,
        sunrise_event,
        sunset_event,
        sunrise: event_instant(&sunrise_event),
        sunset: event_instant(&sunset_event),
    })
}

fn event_instant(event: &SunEvent) -> Option<CalendarTime> {
    let time = event.event()?;
    match time.to_calendar_time(0.0) {
        Ok(instant) => Some(instant),
        Err(err) => {
            log::debug!("dropping event at JD {}: {err}", time.julian_day);
            None
        }
    }
}
