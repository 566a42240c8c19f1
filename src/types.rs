//! Core data types for the solar calculations.

use crate::error::{check_latitude, check_longitude};
use crate::math::{MINUTES_PER_DAY, floor, mul_add, normalize_degrees_0_to_360};
use crate::time::{CalendarTime, UNIX_EPOCH_JD};
use crate::{Error, Result};

/// Observer location on the Earth's surface.
///
/// Latitude is positive north of the equator. Longitude is accepted in
/// [-540, 540) degrees and stored normalized into [0, 360), positive east.
/// Each coordinate is unset until assigned; [`Location::default`] has neither.
///
/// # Example
/// ```
/// # use solar_calculator::Location;
/// let location = Location::new(40.77, -111.89).unwrap();
/// assert_eq!(location.latitude().unwrap(), 40.77);
/// assert!((location.longitude().unwrap() - 248.11).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Location {
    /// Creates a location with both coordinates set.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let mut location = Self::default();
        location.set_latitude(latitude)?;
        location.set_longitude(longitude)?;
        Ok(location)
    }

    /// Sets the latitude in degrees.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` outside [-90, 90]; the location is unchanged.
    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        check_latitude(latitude)?;
        self.latitude = Some(latitude);
        Ok(())
    }

    /// Latitude in degrees.
    ///
    /// # Errors
    /// Returns `NotConfigured` if the latitude was never set.
    pub fn latitude(&self) -> Result<f64> {
        self.latitude
            .ok_or(Error::not_configured("latitude not set"))
    }

    /// Whether the latitude is set.
    #[must_use]
    pub const fn has_latitude(&self) -> bool {
        self.latitude.is_some()
    }

    /// Sets the longitude in degrees, normalized into [0, 360).
    ///
    /// # Errors
    /// Returns `InvalidLongitude` outside [-540, 540); the location is unchanged.
    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        check_longitude(longitude)?;
        self.longitude = Some(normalize_degrees_0_to_360(longitude));
        Ok(())
    }

    /// Longitude in degrees, in [0, 360).
    ///
    /// # Errors
    /// Returns `NotConfigured` if the longitude was never set.
    pub fn longitude(&self) -> Result<f64> {
        self.longitude
            .ok_or(Error::not_configured("longitude not set"))
    }

    /// Whether the longitude is set.
    #[must_use]
    pub const fn has_longitude(&self) -> bool {
        self.longitude.is_some()
    }

    /// Unsets both coordinates.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Apparent position of the sun in the observer's sky.
///
/// - Azimuth: 0° = North, measured clockwise, in [0°, 360°)
/// - Elevation: 0° = horizon, 90° = zenith, refraction corrected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Azimuth angle in degrees
    azimuth: f64,
    /// Refraction-corrected elevation angle in degrees
    elevation: f64,
}

impl HorizontalPosition {
    pub(crate) const fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Gets the azimuth angle in degrees (0° to 360°, 0° = North, increasing clockwise).
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the refraction-corrected elevation angle in degrees.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Gets the zenith angle in degrees: zenith = 90° - elevation.
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.elevation
    }

    /// Checks if the sun is above the horizon (elevation angle > 0°).
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.elevation > 0.0
    }
}

/// A sunrise or sunset instant.
///
/// `julian_day` is the Julian Day at local midnight of the day the event
/// falls on (always a half-integer) and `local_minutes` is the local clock
/// time in [0, 1440) for the timezone offset the search was run with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    /// Julian Day of the local day containing the event
    pub julian_day: f64,
    /// Local time of day in minutes
    pub local_minutes: f64,
    /// Solar azimuth at the event in degrees
    pub azimuth: f64,
}

impl EventTime {
    /// Converts the event to a UTC [`CalendarTime`], truncated to the second.
    ///
    /// `timezone` must be the hour offset the event was computed with.
    ///
    /// # Errors
    /// Returns an error if the instant lies outside the supported years.
    pub fn to_calendar_time(&self, timezone: f64) -> Result<CalendarTime> {
        let minutes = mul_add(-timezone, 60.0, self.local_minutes);
        let epoch = mul_add(self.julian_day - UNIX_EPOCH_JD, 86_400.0, minutes * 60.0);
        if !epoch.is_finite() {
            return Err(Error::invalid_datetime("event time is not finite"));
        }
        CalendarTime::from_epoch(floor(epoch))
    }

    /// Local time as (hour, minute, second), truncated.
    #[must_use]
    pub fn local_hms(&self) -> (u32, u32, u32) {
        let total_seconds = floor(self.local_minutes.clamp(0.0, MINUTES_PER_DAY) * 60.0) as u32;
        let total_seconds = total_seconds.min(86_399);
        (
            total_seconds / 3600,
            (total_seconds / 60) % 60,
            total_seconds % 60,
        )
    }
}

/// Outcome of a sunrise or sunset search.
///
/// The calculator never reports a missing event as an error: polar
/// conditions are resolved by searching neighbouring days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SunEvent {
    /// The sun crosses the horizon on the requested day
    OnDay(EventTime),
    /// No crossing on the requested day; the nearest crossing found by
    /// stepping whole days is reported instead
    Nearest {
        /// The crossing that was found
        event: EventTime,
        /// Whether the requested day was classified as polar day
        /// (sun continuously up) rather than polar night
        polar_day: bool,
    },
    /// The day-stepping search gave up without finding a crossing
    NotFound {
        /// Whether the requested day was classified as polar day
        polar_day: bool,
    },
}

impl SunEvent {
    /// Gets the event time if one was found.
    #[must_use]
    pub const fn event(&self) -> Option<&EventTime> {
        match self {
            Self::OnDay(event) | Self::Nearest { event, .. } => Some(event),
            Self::NotFound { .. } => None,
        }
    }

    /// Checks if the event happens on the requested day.
    #[must_use]
    pub const fn is_on_day(&self) -> bool {
        matches!(self, Self::OnDay(_))
    }

    /// Checks if the requested day was classified as polar day.
    #[must_use]
    pub const fn is_polar_day(&self) -> bool {
        matches!(
            self,
            Self::Nearest {
                polar_day: true,
                ..
            } | Self::NotFound { polar_day: true }
        )
    }
}
