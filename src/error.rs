//! Error types for the solar calculator.

use core::fmt;

/// Result of a fallible calculator operation.
pub type Result<T> = core::result::Result<T, Error>;

/// Earliest calendar year accepted by the calculator.
pub const MIN_YEAR: i32 = -1000;

/// Latest calendar year accepted by the calculator.
pub const MAX_YEAR: i32 = 2999;

/// Largest hour offset from UTC accepted for reported local times.
pub const MAX_TIMEZONE_HOURS: f64 = 24.0;

/// Broad classification of an [`Error`].
///
/// Callers that only need to know whether an input was rejected or whether a
/// value was read too early can match on this instead of on the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input value was outside its permitted range or malformed.
    OutOfRange,
    /// A value was read before the inputs it depends on were set.
    NotConfigured,
}

/// Errors reported by the solar calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude outside [-90, 90] degrees, or not finite.
    InvalidLatitude {
        /// The rejected latitude.
        value: f64,
    },
    /// Longitude outside [-540, 540) degrees, or not finite.
    InvalidLongitude {
        /// The rejected longitude.
        value: f64,
    },
    /// Hour offset from UTC outside [-24, 24], or not finite.
    InvalidTimezone {
        /// The rejected offset in hours.
        hours: f64,
    },
    /// Year outside the supported range.
    InvalidYear {
        /// The rejected year.
        year: i64,
    },
    /// Day of year outside the length of the year.
    InvalidDayOfYear {
        /// The rejected day of year.
        day_of_year: u32,
        /// Number of days in the year the value was applied to.
        days_in_year: u32,
    },
    /// Malformed calendar field or epoch value.
    InvalidDateTime {
        /// Which field or value was rejected.
        message: &'static str,
    },
    /// A value was requested before its inputs were configured.
    NotConfigured {
        /// What is missing.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(f, "latitude {value}° out of range [-90°, 90°]")
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be in [-540°, 540°))"
                )
            }
            Self::InvalidTimezone { hours } => {
                write!(f, "timezone offset {hours} h out of range [-24 h, 24 h]")
            }
            Self::InvalidYear { year } => {
                write!(
                    f,
                    "invalid year {year} (must be between {MIN_YEAR} and {MAX_YEAR})"
                )
            }
            Self::InvalidDayOfYear {
                day_of_year,
                days_in_year,
            } => {
                write!(
                    f,
                    "invalid day of year {day_of_year} (must be between 1 and {days_in_year})"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::NotConfigured { message } => {
                write!(f, "not configured: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Latitude rejected by [`check_latitude`].
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Longitude rejected by [`check_longitude`].
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Hour offset rejected by [`check_timezone`].
    #[must_use]
    pub const fn invalid_timezone(hours: f64) -> Self {
        Self::InvalidTimezone { hours }
    }

    /// Year rejected by [`check_year`].
    #[must_use]
    pub const fn invalid_year(year: i64) -> Self {
        Self::InvalidYear { year }
    }

    /// Ordinal day that does not exist in its year.
    #[must_use]
    pub const fn invalid_day_of_year(day_of_year: u32, days_in_year: u32) -> Self {
        Self::InvalidDayOfYear {
            day_of_year,
            days_in_year,
        }
    }

    /// Malformed calendar field or epoch value.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Value read before its inputs were set.
    #[must_use]
    pub const fn not_configured(message: &'static str) -> Self {
        Self::NotConfigured { message }
    }

    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured { .. } => ErrorKind::NotConfigured,
            Self::InvalidLatitude { .. }
            | Self::InvalidLongitude { .. }
            | Self::InvalidTimezone { .. }
            | Self::InvalidYear { .. }
            | Self::InvalidDayOfYear { .. }
            | Self::InvalidDateTime { .. } => ErrorKind::OutOfRange,
        }
    }
}

/// Checks a latitude against [-90, 90] degrees.
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees or NaN.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Checks a longitude against the accepted input range [-540, 540) degrees.
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside [-540, 540) or NaN.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-540.0..540.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Checks an hour offset from UTC against [-24, 24].
///
/// # Errors
/// Returns `InvalidTimezone` for larger offsets, infinities and NaN.
pub fn check_timezone(hours: f64) -> Result<()> {
    if !(-MAX_TIMEZONE_HOURS..=MAX_TIMEZONE_HOURS).contains(&hours) {
        return Err(Error::invalid_timezone(hours));
    }
    Ok(())
}

/// Checks that a Julian Day is a finite number.
///
/// # Errors
/// Returns `InvalidDateTime` for NaN and infinities.
pub fn check_julian_day(julian_day: f64) -> Result<()> {
    if !julian_day.is_finite() {
        return Err(Error::invalid_datetime("julian day must be finite"));
    }
    Ok(())
}

/// Validates a year lies in [`MIN_YEAR`, `MAX_YEAR`].
///
/// # Errors
/// Returns `InvalidYear` for years outside the supported range.
pub fn check_year(year: i64) -> Result<()> {
    if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
        return Err(Error::invalid_year(year));
    }
    Ok(())
}
