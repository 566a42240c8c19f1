use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use solar_calculator::time::julian_day;
use solar_calculator::{CalendarTime, Location, SolarPosition, noaa};
use std::hint::black_box;

fn benchmark_single_position(c: &mut Criterion) {
    let time = CalendarTime::from_epoch_seconds(1_622_042_345).unwrap();

    c.bench_function("noaa_position_single", |b| {
        b.iter(|| {
            let series = noaa::SolarSeries::at(black_box(time).julian_century());
            noaa::horizontal_position(
                &series,
                black_box(time.minutes_of_day()),
                black_box(40.77),
                black_box(248.11),
                black_box(0.0),
            )
        })
    });

    c.bench_function("aggregate_set_time", |b| {
        let mut sun = SolarPosition::new();
        sun.set_location(Location::new(40.77, -111.89).unwrap())
            .unwrap();
        b.iter(|| sun.set_time(black_box(1_622_042_345)).unwrap())
    });
}

fn benchmark_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("events");
    let regular_day = julian_day(2021, 5, 26);
    let polar_day = julian_day(2021, 6, 21);

    group.bench_function("sunrise_regular_day", |b| {
        b.iter(|| {
            noaa::sunrise(
                black_box(regular_day),
                black_box(40.77),
                black_box(-111.89),
                black_box(-6.0),
            )
            .unwrap()
        })
    });

    // nearest sunrise is 69 days back
    group.bench_function("sunrise_polar_day", |b| {
        b.iter(|| noaa::sunrise(black_box(polar_day), black_box(80.0), 15.0, 0.0).unwrap())
    });

    // exhausts the search budget
    group.bench_function("sunrise_at_pole", |b| {
        b.iter(|| noaa::sunrise(black_box(polar_day), black_box(90.0), 0.0, 0.0).unwrap())
    });

    group.bench_function("solar_noon", |b| {
        b.iter(|| noaa::solar_noon(black_box(regular_day), black_box(-111.89), -6.0).unwrap())
    });

    group.finish();
}

fn benchmark_time_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series");
    let start = CalendarTime::from_calendar(2021, 1, 1, 0, 0, 0, 0).unwrap();

    for size in [100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("hourly", size), &size, |b, &size| {
            let mut sun = SolarPosition::new();
            sun.set_location(Location::new(40.77, -111.89).unwrap())
                .unwrap();
            b.iter(|| {
                for hour in 0..size {
                    let time = start + (hour * 3600) as f64;
                    sun.set_calendar_time(time).unwrap();
                    black_box(sun.elevation().unwrap());
                }
            })
        });
    }

    group.finish();
}

fn benchmark_calendar(c: &mut Criterion) {
    c.bench_function("calendar_fields_from_epoch", |b| {
        b.iter(|| {
            let time = CalendarTime::from_epoch(black_box(1_336_403_638.0001)).unwrap();
            (time.year(), time.month_and_day(), time.day_of_year())
        })
    });
}

criterion_group!(
    benches,
    benchmark_single_position,
    benchmark_events,
    benchmark_time_series,
    benchmark_calendar
);
criterion_main!(benches);
