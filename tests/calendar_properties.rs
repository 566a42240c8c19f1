//! Property tests for calendar conversions and time arithmetic.

use proptest::prelude::*;
use solar_calculator::error::{MAX_YEAR, MIN_YEAR};
use solar_calculator::time::{
    calendar_from_julian_day, day_of_year, days_in_month, is_leap_year, julian_day,
};
use solar_calculator::{CalendarTime, Location, SolarPosition};

/// 1000 BCE to the end of 2999, in seconds since the Unix epoch.
const MIN_EPOCH: i64 = -93_724_128_000;
const MAX_EPOCH: i64 = 32_503_679_999;

fn calendar_fields() -> impl Strategy<Value = (i32, u32, u32, u32, u32, u32, u32)> {
    (MIN_YEAR..=MAX_YEAR, 1u32..=12)
        .prop_flat_map(|(year, month)| {
            let days = days_in_month(year, month).unwrap();
            (
                Just(year),
                Just(month),
                1..=days,
                0u32..24,
                0u32..60,
                0u32..60,
                0u32..1_000_000,
            )
        })
}

proptest! {
    #[test]
    fn calendar_fields_round_trip((year, month, day, hour, minute, second, micro) in calendar_fields()) {
        let time = CalendarTime::from_calendar(year, month, day, hour, minute, second, micro).unwrap();
        prop_assert_eq!(time.year(), year);
        prop_assert_eq!(time.month_and_day(), (month, day));
        prop_assert_eq!(time.hour(), hour);
        prop_assert_eq!(time.minute(), minute);
        prop_assert_eq!(time.second(), second);
        prop_assert_eq!(time.microsecond(), micro);
        prop_assert_eq!(time.day_of_year(), day_of_year(year, month, day).unwrap());
        prop_assert_eq!(time.is_leap_year(), is_leap_year(year));

        let again = CalendarTime::from_epoch_micros(time.epoch_micros()).unwrap();
        prop_assert_eq!(again, time);

        let by_ordinal = CalendarTime::from_day_of_year(
            year, time.day_of_year(), hour, minute, second, micro,
        ).unwrap();
        prop_assert_eq!(by_ordinal, time);
    }

    #[test]
    fn julian_day_round_trip((year, month, day, ..) in calendar_fields()) {
        let jd = julian_day(year, month, day);
        prop_assert_eq!(jd.fract(), 0.5);
        let (y, m, d) = calendar_from_julian_day(jd);
        prop_assert_eq!((y, m, d), (year, month, f64::from(day)));
    }

    #[test]
    fn epoch_seconds_round_trip(seconds in MIN_EPOCH..=MAX_EPOCH) {
        let time = CalendarTime::from_epoch_seconds(seconds).unwrap();
        prop_assert_eq!(time.epoch_seconds(), seconds);
        prop_assert!((MIN_YEAR..=MAX_YEAR).contains(&time.year()));

        let rebuilt = CalendarTime::from_calendar(
            time.year(),
            time.month(),
            time.day_of_month(),
            time.hour(),
            time.minute(),
            time.second(),
            time.microsecond(),
        ).unwrap();
        prop_assert_eq!(rebuilt, time);
    }

    #[test]
    fn ordering_follows_epoch(a in MIN_EPOCH..=MAX_EPOCH, b in MIN_EPOCH..=MAX_EPOCH) {
        let ta = CalendarTime::from_epoch_seconds(a).unwrap();
        let tb = CalendarTime::from_epoch_seconds(b).unwrap();
        prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
        prop_assert_eq!(tb - ta, (b - a) as f64);
    }

    #[test]
    fn whole_second_arithmetic_is_exact(
        start in -3_000_000_000i64..=4_000_000_000,
        offset in -1_000_000_000i64..=1_000_000_000,
    ) {
        let time = CalendarTime::from_epoch_seconds(start).unwrap();
        let moved = time + offset as f64;
        prop_assert_eq!(moved.epoch_seconds(), start + offset);
        prop_assert_eq!(moved - offset as f64, time);
    }

    #[test]
    fn chrono_agrees_on_calendar_fields(seconds in MIN_EPOCH..=MAX_EPOCH) {
        use chrono::{Datelike, Timelike};

        let time = CalendarTime::from_epoch_seconds(seconds).unwrap();
        let datetime = time.to_datetime().unwrap();
        prop_assert_eq!(datetime.year(), time.year());
        prop_assert_eq!(datetime.month(), time.month());
        prop_assert_eq!(datetime.day(), time.day_of_month());
        prop_assert_eq!(datetime.ordinal(), time.day_of_year());
        prop_assert_eq!(datetime.hour(), time.hour());
        prop_assert_eq!(CalendarTime::from_datetime(&datetime).unwrap(), time);
    }

    #[test]
    fn derived_values_never_nan(
        latitude in -90.0f64..=90.0,
        longitude in -540.0f64..540.0,
        seconds in -2_208_988_800i64..=4_102_444_800,
    ) {
        let mut sun = SolarPosition::new();
        sun.set_location(Location::new(latitude, longitude).unwrap()).unwrap();
        sun.set_time(seconds).unwrap();

        prop_assert!(sun.elevation().unwrap().is_finite());
        let azimuth = sun.azimuth().unwrap();
        prop_assert!((0.0..360.0).contains(&azimuth));
        let noon = sun.solar_noon().unwrap();
        prop_assert!((0.0..1440.0).contains(&noon));
    }
}
