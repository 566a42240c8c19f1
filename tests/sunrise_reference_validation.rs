//! Test sunrise/sunset/solar noon calculations against reference data.

use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike};
use csv::ReaderBuilder;
use solar_calculator::noaa::{self, EventKind, MAX_POLAR_SEARCH_DAYS};
use solar_calculator::time::{calendar_from_julian_day, julian_day};
use solar_calculator::{EventTime, Location, SolarPosition, SunEvent};
use std::error::Error;
use std::fs::File;

/// Reference times are truncated to the second.
const TOLERANCE_SECONDS: i64 = 1;

#[derive(Debug)]
struct ExpectedEvent {
    kind: String,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

#[derive(Debug)]
struct SunriseTestRecord {
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    timezone: f64,
    sunrise: ExpectedEvent,
    sunset: ExpectedEvent,
    solar_noon: NaiveTime,
}

impl ExpectedEvent {
    fn from_fields(kind: &str, date: &str, time: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            kind: kind.to_string(),
            date: if date.is_empty() { None } else { Some(date.parse()?) },
            time: if time.is_empty() {
                None
            } else {
                Some(NaiveTime::parse_from_str(time, "%H:%M:%S")?)
            },
        })
    }
}

impl SunriseTestRecord {
    fn from_csv_record(record: &csv::StringRecord) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            date: record[0].parse()?,
            latitude: record[1].parse()?,
            longitude: record[2].parse()?,
            timezone: record[3].parse()?,
            sunrise: ExpectedEvent::from_fields(&record[4], &record[5], &record[6])?,
            sunset: ExpectedEvent::from_fields(&record[7], &record[8], &record[9])?,
            solar_noon: NaiveTime::parse_from_str(&record[10], "%H:%M:%S")?,
        })
    }

    fn julian_day(&self) -> f64 {
        use chrono::Datelike;
        julian_day(self.date.year(), self.date.month(), self.date.day())
    }
}

fn load_records() -> Result<Vec<SunriseTestRecord>, Box<dyn Error>> {
    let file = File::open("tests/data/reference_events.csv")?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(file);

    reader
        .records()
        .map(|record| SunriseTestRecord::from_csv_record(&record?))
        .collect()
}

fn kind_label(event: &SunEvent) -> &'static str {
    match event {
        SunEvent::OnDay(_) => "on_day",
        SunEvent::Nearest {
            polar_day: true, ..
        } => "polar_day",
        SunEvent::Nearest {
            polar_day: false, ..
        } => "polar_night",
        SunEvent::NotFound { polar_day: true } => "none_day",
        SunEvent::NotFound { polar_day: false } => "none_night",
    }
}

fn event_date(event: &EventTime) -> NaiveDate {
    let (year, month, day) = calendar_from_julian_day(event.julian_day);
    NaiveDate::from_ymd_opt(year, month, day as u32).unwrap()
}

fn seconds_of_day(minutes: f64) -> i64 {
    (minutes * 60.0).floor() as i64
}

fn check_event(actual: &SunEvent, expected: &ExpectedEvent, record: &SunriseTestRecord) {
    assert_eq!(kind_label(actual), expected.kind, "{record:?}");

    match (actual.event(), expected.date, expected.time) {
        (Some(event), Some(date), Some(time)) => {
            assert_eq!(event_date(event), date, "{record:?}");
            let diff = seconds_of_day(event.local_minutes)
                - i64::from(time.num_seconds_from_midnight());
            assert!(
                diff.abs() <= TOLERANCE_SECONDS,
                "event {event:?} off by {diff}s for {record:?}"
            );
        }
        (None, None, None) => {}
        (event, date, time) => panic!("mismatch: {event:?} vs {date:?} {time:?}"),
    }
}

#[test]
fn test_events_against_reference_data() -> Result<(), Box<dyn Error>> {
    let records = load_records()?;
    assert!(records.len() >= 30);

    for record in &records {
        let jd = record.julian_day();
        let sunrise = noaa::sunrise(jd, record.latitude, record.longitude, record.timezone)?;
        let sunset = noaa::sunset(jd, record.latitude, record.longitude, record.timezone)?;

        check_event(&sunrise, &record.sunrise, record);
        check_event(&sunset, &record.sunset, record);

        let noon = noaa::solar_noon(jd, record.longitude, record.timezone)?;
        let diff = seconds_of_day(noon) - i64::from(record.solar_noon.num_seconds_from_midnight());
        assert!(diff.abs() <= TOLERANCE_SECONDS, "noon off by {diff}s for {record:?}");
    }
    Ok(())
}

#[test]
fn test_rise_precedes_set_on_regular_days() -> Result<(), Box<dyn Error>> {
    for record in load_records()? {
        let jd = record.julian_day();
        let sunrise = noaa::sunrise(jd, record.latitude, record.longitude, record.timezone)?;
        let sunset = noaa::sunset(jd, record.latitude, record.longitude, record.timezone)?;

        if let (SunEvent::OnDay(rise), SunEvent::OnDay(set)) = (sunrise, sunset) {
            let rise_at = rise.to_calendar_time(record.timezone)?;
            let set_at = set.to_calendar_time(record.timezone)?;
            assert!(rise_at < set_at, "{record:?}");
            assert!(set_at - rise_at < 86_400.0);

            // sunrise in the east, sunset in the west
            assert!(rise.azimuth < 180.0, "{record:?}");
            assert!(set.azimuth > 180.0, "{record:?}");
        }
    }
    Ok(())
}

#[test]
fn test_aggregate_events_in_named_timezone() -> Result<(), Box<dyn Error>> {
    let denver = chrono_tz::America::Denver;

    let mut sun = SolarPosition::new();
    sun.set_location(Location::new(40.77, -111.89)?)?;
    sun.set_time(1_622_042_345)?; // 2021-05-26T15:19:05Z

    let sunrise = sun.sunrise()?.expect("sunrise").to_datetime()?;
    let local = sunrise.with_timezone(&denver);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2021, 5, 26).unwrap());
    assert_eq!((local.hour(), local.minute(), local.second()), (6, 1, 24));

    let sunset = sun.sunset()?.expect("sunset").to_datetime()?;
    let local = sunset.with_timezone(&denver);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2021, 5, 26).unwrap());
    assert_eq!((local.hour(), local.minute(), local.second()), (20, 48, 23));

    // the aggregate's UTC noon agrees with the local offset used by the engine
    let offset_hours = -6.0;
    let local_noon = noaa::solar_noon(julian_day(2021, 5, 26), -111.89, offset_hours)?;
    let utc_noon = sun.solar_noon()?;
    assert!((utc_noon - (local_noon - offset_hours * 60.0)).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_aggregate_matches_engine_day() -> Result<(), Box<dyn Error>> {
    let auckland = chrono_tz::Pacific::Auckland;
    let datetime = auckland.with_ymd_and_hms(2021, 5, 26, 12, 0, 0).unwrap();

    let mut sun = SolarPosition::new();
    sun.set_location(Location::new(-36.85, 174.76)?)?;
    sun.set_datetime(&datetime)?;

    // local noon in Auckland is 00:00Z, so the UTC day is the same calendar day
    let event = noaa::sunrise(julian_day(2021, 5, 26), -36.85, 174.76, 0.0)?;
    let expected = event.event().expect("sunrise").to_calendar_time(0.0)?;
    assert_eq!(sun.sunrise()?, Some(expected));

    let local = expected.to_datetime()?.with_timezone(&auckland);
    assert_eq!((local.hour(), local.minute()), (7, 20));
    Ok(())
}

#[test]
fn test_polar_search_directions() -> Result<(), Box<dyn Error>> {
    let midsummer = julian_day(2021, 6, 21);
    let midwinter = julian_day(2021, 12, 21);

    let cases = [
        (midsummer, EventKind::Sunrise, true, -1.0),
        (midsummer, EventKind::Sunset, true, 1.0),
        (midwinter, EventKind::Sunrise, false, 1.0),
        (midwinter, EventKind::Sunset, false, -1.0),
    ];

    for (jd, kind, polar_day, direction) in cases {
        let event = noaa::sun_event(kind, jd, 80.0, 15.0, 0.0)?;
        let SunEvent::Nearest {
            event,
            polar_day: classified,
        } = event
        else {
            panic!("expected a nearest event for {kind:?} at JD {jd}, got {event:?}");
        };
        assert_eq!(classified, polar_day);
        assert!((event.julian_day - jd) * direction > 0.0, "{kind:?} at JD {jd}");
        assert!((event.julian_day - jd).abs() < f64::from(MAX_POLAR_SEARCH_DAYS));
    }
    Ok(())
}

#[test]
fn test_polar_search_gives_up_at_the_poles() -> Result<(), Box<dyn Error>> {
    for latitude in [90.0, -90.0] {
        for jd in [julian_day(2021, 3, 20), julian_day(2021, 6, 21), julian_day(2021, 12, 21)] {
            for kind in [EventKind::Sunrise, EventKind::Sunset] {
                let event = noaa::sun_event(kind, jd, latitude, 0.0, 0.0)?;
                assert!(matches!(event, SunEvent::NotFound { .. }), "{event:?}");
            }
        }
    }
    Ok(())
}
