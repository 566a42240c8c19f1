//! Calendar and Julian day arithmetic.
//!
//! [`CalendarTime`] is a UTC instant held as whole microseconds since the Unix
//! epoch, with the calendar fields always derived from that single value. The
//! Julian day conversions follow Meeus, "Astronomical Algorithms", chapter 7,
//! on the proleptic Gregorian calendar.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::{check_julian_day, check_year};
use crate::math::{floor, round};
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Microseconds per second
const MICROS_PER_SECOND: i64 = 1_000_000;

/// Microseconds per minute
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;

/// Microseconds per hour
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;

/// Microseconds per day
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Epoch values further than this many days from 1970 are rejected before any
/// calendar decomposition is attempted.
const MAX_ABS_EPOCH_DAYS: f64 = 2_000_000.0;

/// Returns true for Gregorian leap years.
///
/// A year is a leap year when it is divisible by 4 and not by 100, or when it
/// is divisible by 400.
///
/// # Example
/// ```
/// # use solar_calculator::time::is_leap_year;
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// ```
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in `month` of `year`.
///
/// # Errors
/// Returns `InvalidDateTime` if month is outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => return Err(Error::invalid_datetime("month must be between 1 and 12")),
    };
    Ok(days)
}

/// Ordinal day of the year for a month and day of `year`.
///
/// # Errors
/// Returns `InvalidDateTime` if the month is outside 1-12 or the day does not
/// exist in that month.
///
/// # Example
/// ```
/// # use solar_calculator::time::day_of_year;
/// assert_eq!(day_of_year(2012, 12, 31).unwrap(), 366);
/// assert!(day_of_year(2013, 2, 29).is_err());
/// ```
pub fn day_of_year(year: i32, month: u32, day: u32) -> Result<u32> {
    if !(1..=days_in_month(year, month)?).contains(&day) {
        return Err(Error::invalid_datetime("day does not exist in month"));
    }
    Ok(ordinal_of(year, month, day))
}

/// `⌊275m/9⌋ − k⌊(m+9)/12⌋ + d − 30` with `k = 1` for leap years and `k = 2`
/// otherwise. Month and day must already be valid.
const fn ordinal_of(year: i32, month: u32, day: u32) -> u32 {
    let k = if is_leap_year(year) { 1 } else { 2 };
    (275 * month) / 9 - k * ((month + 9) / 12) + day - 30
}

/// Month and day of month for an ordinal day of `year`.
///
/// # Errors
/// Returns `InvalidDayOfYear` if `ordinal` is outside 1 to 365/366.
pub fn month_and_day_from_ordinal(year: i32, ordinal: u32) -> Result<(u32, u32)> {
    let length = days_in_year(year);
    if !(1..=length).contains(&ordinal) {
        return Err(Error::invalid_day_of_year(ordinal, length));
    }

    let mut remaining = ordinal;
    for month in 1..=12 {
        let days = days_in_month(year, month)?;
        if remaining <= days {
            return Ok((month, remaining));
        }
        remaining -= days;
    }
    Err(Error::invalid_day_of_year(ordinal, length))
}

/// Julian Day at 0h UTC of a calendar date.
///
/// January and February are treated as months 13 and 14 of the previous year,
/// and the Gregorian correction term `B = 2 − A + ⌊A/4⌋` is always applied.
/// The result is always a half-integer.
#[must_use]
pub fn julian_day(year: i32, month: u32, day: u32) -> f64 {
    let (y, m) = if month <= 2 {
        (f64::from(year - 1), f64::from(month + 12))
    } else {
        (f64::from(year), f64::from(month))
    };

    let a = floor(y / 100.0);
    let b = 2.0 - a + floor(a / 4.0);

    floor(365.25 * (y + 4716.0)) + floor(30.6001 * (m + 1.0)) + f64::from(day) + b - 1524.5
}

/// Calendar date of a Julian Day.
///
/// Returns `(year, month, day)` where `day` carries the fraction of the day.
#[must_use]
pub fn calendar_from_julian_day(jd: f64) -> (i32, u32, f64) {
    let z = floor(jd + 0.5);
    let f = (jd + 0.5) - z;

    let alpha = floor((z - 1_867_216.25) / 36_524.25);
    let a = z + 1.0 + alpha - floor(alpha / 4.0);

    let b = a + 1524.0;
    let c = floor((b - 122.1) / 365.25);
    let d = floor(365.25 * c);
    let e = floor((b - d) / 30.6001);

    let day = b - d - floor(30.6001 * e) + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

/// Day of year of a Julian Day, using the calendar date it falls on.
///
/// # Errors
/// Returns `InvalidDateTime` if `jd` is not finite.
pub fn day_of_year_from_julian_day(jd: f64) -> Result<u32> {
    check_julian_day(jd)?;
    let (year, month, day) = calendar_from_julian_day(jd);
    day_of_year(year, month, floor(day) as u32)
}

/// Calculates the Julian Century (JC) from J2000.0.
///
/// JC = (JD - 2451545.0) / 36525
#[must_use]
pub fn julian_century(jd: f64) -> f64 {
    (jd - J2000_JDN) / DAYS_PER_CENTURY
}

/// A UTC instant with calendar fields, microsecond resolution.
///
/// Supports years in [`MIN_YEAR`](crate::error::MIN_YEAR) to
/// [`MAX_YEAR`](crate::error::MAX_YEAR). The default value is the Unix epoch.
///
/// # Example
/// ```
/// # use solar_calculator::CalendarTime;
/// let time = CalendarTime::from_calendar(2012, 5, 7, 15, 13, 58, 100).unwrap();
/// assert_eq!(time.day_of_year(), 128);
/// assert!(time.is_leap_year());
/// assert!((time.epoch() - 1_336_403_638.0001).abs() < 1e-6);
///
/// let later = time + 86_400.0;
/// assert_eq!(later.day_of_month(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalendarTime {
    /// Microseconds since 1970-01-01T00:00:00 UTC
    micros: i64,
}

impl CalendarTime {
    /// Creates a time from seconds since the Unix epoch (with fractional seconds).
    ///
    /// The fraction is rounded to the nearest microsecond.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for non-finite input and `InvalidYear` when
    /// the instant falls outside the supported years.
    pub fn from_epoch(epoch: f64) -> Result<Self> {
        if !epoch.is_finite() {
            return Err(Error::invalid_datetime("epoch must be finite"));
        }
        if (epoch / SECONDS_PER_DAY).abs() > MAX_ABS_EPOCH_DAYS {
            return Err(Error::invalid_datetime("epoch is outside the supported range"));
        }

        let whole = floor(epoch);
        let micros = round((epoch - whole) * 1e6) as i64;
        Self::from_epoch_micros(whole as i64 * MICROS_PER_SECOND + micros)
    }

    /// Creates a time from whole seconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns `InvalidYear` when the instant falls outside the supported years.
    pub fn from_epoch_seconds(seconds: i64) -> Result<Self> {
        let micros = seconds
            .checked_mul(MICROS_PER_SECOND)
            .ok_or(Error::invalid_datetime("epoch is outside the supported range"))?;
        Self::from_epoch_micros(micros)
    }

    /// Creates a time from microseconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns `InvalidYear` when the instant falls outside the supported years.
    pub fn from_epoch_micros(micros: i64) -> Result<Self> {
        let time = Self { micros };
        check_year(i64::from(time.fields().year))?;
        Ok(time)
    }

    /// Creates a time from calendar fields.
    ///
    /// # Errors
    /// Returns `InvalidYear` or `InvalidDateTime` if any field is out of range.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self> {
        check_year(i64::from(year))?;
        if day == 0 || day > days_in_month(year, month)? {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }
        check_time_of_day(hour, minute, second, microsecond)?;

        Ok(Self::from_fields(Fields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        }))
    }

    /// Creates a time from a year, an ordinal day and a time of day.
    ///
    /// # Errors
    /// Returns `InvalidDayOfYear` if `ordinal` does not exist in `year`, and
    /// `InvalidYear`/`InvalidDateTime` for other out-of-range fields.
    pub fn from_day_of_year(
        year: i32,
        ordinal: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self> {
        check_year(i64::from(year))?;
        let (month, day) = month_and_day_from_ordinal(year, ordinal)?;
        Self::from_calendar(year, month, day, hour, minute, second, microsecond)
    }

    /// Resets to the Unix epoch (1970-01-01T00:00:00).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Seconds since the Unix epoch, including the sub-second fraction.
    #[must_use]
    pub fn epoch(&self) -> f64 {
        let seconds = self.micros.div_euclid(MICROS_PER_SECOND);
        let micros = self.micros.rem_euclid(MICROS_PER_SECOND);
        seconds as f64 + micros as f64 / 1e6
    }

    /// Microseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_micros(&self) -> i64 {
        self.micros
    }

    /// Seconds since the Unix epoch rounded to the nearest whole second.
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        (self.micros + MICROS_PER_SECOND / 2).div_euclid(MICROS_PER_SECOND)
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.fields().year
    }

    /// Month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.fields().month
    }

    /// Day of month (1-31).
    #[must_use]
    pub fn day_of_month(&self) -> u32 {
        self.fields().day
    }

    /// Month and day of month.
    #[must_use]
    pub fn month_and_day(&self) -> (u32, u32) {
        let fields = self.fields();
        (fields.month, fields.day)
    }

    /// Ordinal day of the year (1-366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        let fields = self.fields();
        ordinal_of(fields.year, fields.month, fields.day)
    }

    /// Hour (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.fields().hour
    }

    /// Minute (0-59).
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.fields().minute
    }

    /// Second (0-59).
    #[must_use]
    pub fn second(&self) -> u32 {
        self.fields().second
    }

    /// Microsecond (0-999999).
    #[must_use]
    pub fn microsecond(&self) -> u32 {
        self.fields().microsecond
    }

    /// Whether this time falls in a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// Minutes elapsed since 0h UTC of the current day, with fraction.
    #[must_use]
    pub fn minutes_of_day(&self) -> f64 {
        self.micros.rem_euclid(MICROS_PER_DAY) as f64 / MICROS_PER_MINUTE as f64
    }

    /// Julian Day at 0h UTC of the current day.
    #[must_use]
    pub fn julian_day_at_midnight(&self) -> f64 {
        UNIX_EPOCH_JD + self.micros.div_euclid(MICROS_PER_DAY) as f64
    }

    /// Julian Day of this instant.
    #[must_use]
    pub fn julian_day(&self) -> f64 {
        self.julian_day_at_midnight() + self.minutes_of_day() / 1440.0
    }

    /// Julian centuries since J2000.0 of this instant.
    #[must_use]
    pub fn julian_century(&self) -> f64 {
        julian_century(self.julian_day())
    }

    /// Sets the year, keeping month, day and time of day.
    ///
    /// # Errors
    /// Returns `InvalidYear` for unsupported years and `InvalidDateTime` when
    /// the current day does not exist in the new year (February 29).
    pub fn set_year(&mut self, year: i32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields { year, ..fields })
    }

    /// Sets month and day of month.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the pair does not exist in the current year.
    pub fn set_month_and_day(&mut self, month: u32, day: u32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields {
            month,
            day,
            ..fields
        })
    }

    /// Sets the ordinal day of the current year; month and day are re-derived.
    ///
    /// # Errors
    /// Returns `InvalidDayOfYear` if the day does not exist in the current year.
    pub fn set_day_of_year(&mut self, ordinal: u32) -> Result<()> {
        let fields = self.fields();
        let (month, day) = month_and_day_from_ordinal(fields.year, ordinal)?;
        self.replace(Fields {
            month,
            day,
            ..fields
        })
    }

    /// Sets the hour (0-23).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the hour is out of range.
    pub fn set_hour(&mut self, hour: u32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields { hour, ..fields })
    }

    /// Sets the minute (0-59).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the minute is out of range.
    pub fn set_minute(&mut self, minute: u32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields { minute, ..fields })
    }

    /// Sets the second (0-59).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the second is out of range.
    pub fn set_second(&mut self, second: u32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields { second, ..fields })
    }

    /// Sets the microsecond (0-999999).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the microsecond is out of range.
    pub fn set_microsecond(&mut self, microsecond: u32) -> Result<()> {
        let fields = self.fields();
        self.replace(Fields {
            microsecond,
            ..fields
        })
    }

    /// Adds a signed number of seconds, rounded to the microsecond.
    ///
    /// # Errors
    /// Returns an error if the result leaves the supported years.
    pub fn checked_add_seconds(&self, seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || (seconds / SECONDS_PER_DAY).abs() > 2.0 * MAX_ABS_EPOCH_DAYS {
            return Err(Error::invalid_datetime("duration is outside the supported range"));
        }
        let delta = round(seconds * 1e6) as i64;
        Self::from_epoch_micros(self.micros + delta)
    }

    /// Subtracts a signed number of seconds, rounded to the microsecond.
    ///
    /// # Errors
    /// Returns an error if the result leaves the supported years.
    pub fn checked_sub_seconds(&self, seconds: f64) -> Result<Self> {
        self.checked_add_seconds(-seconds)
    }

    /// Creates a time from a timezone-aware chrono `DateTime`.
    ///
    /// Leap seconds are folded into the last microsecond of the minute.
    ///
    /// # Errors
    /// Returns `InvalidYear` when the instant falls outside the supported years.
    #[cfg(feature = "chrono")]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self> {
        let utc = datetime.with_timezone(&Utc);
        Self::from_calendar(
            utc.year(),
            utc.month(),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second(),
            (utc.nanosecond() / 1_000).min(999_999),
        )
    }

    /// Converts to a chrono UTC `DateTime`.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if chrono cannot represent the instant.
    #[cfg(feature = "chrono")]
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let seconds = self.micros.div_euclid(MICROS_PER_SECOND);
        let nanos = self.micros.rem_euclid(MICROS_PER_SECOND) as u32 * 1_000;
        DateTime::from_timestamp(seconds, nanos)
            .ok_or(Error::invalid_datetime("instant not representable by chrono"))
    }

    fn from_fields(fields: Fields) -> Self {
        let days = round(julian_day(fields.year, fields.month, fields.day) - UNIX_EPOCH_JD) as i64;
        let micros = days * MICROS_PER_DAY
            + i64::from(fields.hour) * MICROS_PER_HOUR
            + i64::from(fields.minute) * MICROS_PER_MINUTE
            + i64::from(fields.second) * MICROS_PER_SECOND
            + i64::from(fields.microsecond);
        Self { micros }
    }

    fn fields(self) -> Fields {
        let days = self.micros.div_euclid(MICROS_PER_DAY);
        let mut rest = self.micros.rem_euclid(MICROS_PER_DAY);

        let (year, month, day) = calendar_from_julian_day(UNIX_EPOCH_JD + days as f64);

        let hour = rest / MICROS_PER_HOUR;
        rest %= MICROS_PER_HOUR;
        let minute = rest / MICROS_PER_MINUTE;
        rest %= MICROS_PER_MINUTE;
        let second = rest / MICROS_PER_SECOND;
        let microsecond = rest % MICROS_PER_SECOND;

        Fields {
            year,
            month,
            day: floor(day) as u32,
            hour: hour as u32,
            minute: minute as u32,
            second: second as u32,
            microsecond: microsecond as u32,
        }
    }

    /// Validates `fields` and replaces this time with them; unchanged on error.
    fn replace(&mut self, fields: Fields) -> Result<()> {
        *self = Self::from_calendar(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.microsecond,
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
}

fn check_time_of_day(hour: u32, minute: u32, second: u32, microsecond: u32) -> Result<()> {
    if hour > 23 {
        return Err(Error::invalid_datetime("hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(Error::invalid_datetime("minute must be between 0 and 59"));
    }
    if second > 59 {
        return Err(Error::invalid_datetime("second must be between 0 and 59"));
    }
    if microsecond > 999_999 {
        return Err(Error::invalid_datetime(
            "microsecond must be between 0 and 999999",
        ));
    }
    Ok(())
}

impl PartialOrd for CalendarTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.micros.cmp(&other.micros)
    }
}

impl Add<f64> for CalendarTime {
    type Output = Self;

    /// Adds seconds.
    ///
    /// # Panics
    /// Panics if the result leaves the supported years; use
    /// [`CalendarTime::checked_add_seconds`] to handle that case.
    fn add(self, seconds: f64) -> Self {
        match self.checked_add_seconds(seconds) {
            Ok(time) => time,
            Err(err) => panic!("`CalendarTime + seconds` out of range: {err}"),
        }
    }
}

impl Sub<f64> for CalendarTime {
    type Output = Self;

    /// Subtracts seconds.
    ///
    /// # Panics
    /// Panics if the result leaves the supported years; use
    /// [`CalendarTime::checked_sub_seconds`] to handle that case.
    fn sub(self, seconds: f64) -> Self {
        match self.checked_sub_seconds(seconds) {
            Ok(time) => time,
            Err(err) => panic!("`CalendarTime - seconds` out of range: {err}"),
        }
    }
}

impl AddAssign<f64> for CalendarTime {
    fn add_assign(&mut self, seconds: f64) {
        *self = *self + seconds;
    }
}

impl SubAssign<f64> for CalendarTime {
    fn sub_assign(&mut self, seconds: f64) {
        *self = *self - seconds;
    }
}

impl Sub for CalendarTime {
    type Output = f64;

    /// Difference in seconds.
    fn sub(self, other: Self) -> f64 {
        (self.micros - other.micros) as f64 / 1e6
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.fields();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
            t.year, t.month, t.day, t.hour, t.minute, t.second, t.microsecond
        )
    }
}
