//! # Solar Calculator
//!
//! Sun position and sunrise/sunset times using the NOAA solar calculator algorithm.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! This library implements the low-order series from Jean Meeus' "Astronomical
//! Algorithms" as used by the NOAA Global Monitoring Laboratory solar
//! calculator:
//! - Solar declination and equation of time from closed-form series in the Julian century
//! - Azimuth and refraction-corrected elevation for an observer
//! - Sunrise, sunset and solar noon, including a nearest-event search during polar day and night
//!
//! Calendar arithmetic is exact: [`CalendarTime`] holds an instant as integer
//! microseconds since the Unix epoch and converts to and from the proleptic
//! Gregorian calendar through Julian Day Numbers.
//!
//! ## Features
//!
//! - Multiple configurations: `std` or `no_std`, with or without `chrono`, math via native or `libm`
//! - Stateless engine in [`noaa`], plus the stateful [`SolarPosition`] aggregate
//! - Polar conditions never fail: a missing event is resolved to the nearest one
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions (usually faster than `libm`)
//! - `chrono` (default): Enable `DateTime<Tz>` conversions
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono
//! solar-calculator = "0.1"
//!
//! # Minimal std (no chrono)
//! solar-calculator = { version = "0.1", default-features = false, features = ["std"] }
//!
//! # Minimal no_std
//! solar-calculator = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: the polar
//! search is reported at `debug`, an exhausted search at `warn` and every
//! recomputation of [`SolarPosition`] at `trace`. No logger is installed.
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd ed. Willmann-Bell.
//! - NOAA Global Monitoring Laboratory, Solar Calculation Details:
//!   <https://gml.noaa.gov/grad/solcalc/calcdetails.html>
//!
//! ## Quick Start
//!
//! ### Solar Position
//! ```rust
//! use solar_calculator::{Location, SolarPosition};
//!
//! let mut sun = SolarPosition::new();
//! sun.set_location(Location::new(40.77, -111.89).unwrap()).unwrap();
//! sun.set_time(1_622_042_345).unwrap(); // 2021-05-26T15:19:05Z
//!
//! println!("Azimuth: {:.3}°", sun.azimuth().unwrap());
//! println!("Elevation: {:.3}°", sun.elevation().unwrap());
//! println!("Declination: {:.3}°", sun.declination().unwrap());
//! println!("Equation of time: {:.2} min", sun.equation_of_time().unwrap());
//! ```
//!
//! ### Sunrise and Sunset in local time
//! ```rust
//! use solar_calculator::{SunEvent, noaa, time::julian_day};
//!
//! // 2021-05-26, Salt Lake City, local clock at UTC-6
//! let jd = julian_day(2021, 5, 26);
//! match noaa::sunrise(jd, 40.77, -111.89, -6.0).unwrap() {
//!     SunEvent::OnDay(event) => {
//!         let (h, m, s) = event.local_hms();
//!         println!("Sunrise {h:02}:{m:02}:{s:02}, azimuth {:.1}°", event.azimuth);
//!     }
//!     SunEvent::Nearest { event, polar_day } => {
//!         println!("No sunrise today (polar day: {polar_day}), nearest on JD {}", event.julian_day);
//!     }
//!     SunEvent::NotFound { .. } => println!("No sunrise within a year"),
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Elevation angle**: 0° = horizon, 90° = directly overhead (-90° to +90°), refraction corrected
//! - **Longitude**: positive east, accepted in [-540°, 540°) and stored in [0°, 360°)
//! - **Timezone**: bare hour offset from UTC, negative west of Greenwich

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::sun::SolarPosition;
pub use crate::time::CalendarTime;
pub use crate::types::{EventTime, HorizontalPosition, Location, SunEvent};

// Algorithm modules
pub mod noaa;

// Core modules
pub mod error;
pub mod sun;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
