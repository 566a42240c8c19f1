//! Floating point helpers shared by the series, geometry and event code.
//!
//! Trigonometry goes through the standard library when `std` is enabled and
//! through `libm` otherwise.

/// Minutes per day (1440).
pub const MINUTES_PER_DAY: f64 = 1440.0;

macro_rules! dispatch {
    ($($(#[$doc:meta])* $name:ident => $libm:ident;)+) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(x: f64) -> f64 {
                #[cfg(feature = "std")]
                return x.$name();

                #[cfg(not(feature = "std"))]
                return libm::$libm(x);
            }
        )+
    };
}

dispatch! {
    /// Sine of an angle in radians.
    sin => sin;
    /// Cosine of an angle in radians.
    cos => cos;
    /// Tangent of an angle in radians.
    tan => tan;
    /// Arcsine in radians; NaN outside [-1, 1].
    asin => asin;
    /// Arccosine in radians; NaN outside [-1, 1].
    acos => acos;
    /// Largest integer not greater than `x`.
    floor => floor;
    /// Nearest integer, halfway cases away from zero.
    round => round;
}

/// `x * a + b` with a single rounding.
#[inline]
pub fn mul_add(x: f64, a: f64, b: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.mul_add(a, b);

    #[cfg(not(feature = "std"))]
    return libm::fma(x, a, b);
}

#[inline]
pub const fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub const fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Wraps `value` into the half-open interval `[0, period)`.
///
/// One remainder operation, whatever the magnitude of `value`.
pub fn wrap_to_period(value: f64, period: f64) -> f64 {
    let wrapped = value % period;
    let wrapped = if wrapped < 0.0 {
        wrapped + period
    } else {
        wrapped
    };
    // -tiny % p + p rounds up to p
    if wrapped >= period { 0.0 } else { wrapped }
}

/// Angle in degrees wrapped into [0, 360).
pub fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    wrap_to_period(degrees, 360.0)
}

/// Angle in degrees wrapped into [-180, 180).
pub fn normalize_degrees_signed(degrees: f64) -> f64 {
    wrap_to_period(degrees + 180.0, 360.0) - 180.0
}

/// Time of day in minutes wrapped into [0, 1440).
pub fn normalize_minutes_of_day(minutes: f64) -> f64 {
    wrap_to_period(minutes, MINUTES_PER_DAY)
}

/// Clamps a sine/cosine value into [-1, 1] ahead of an inverse trig call.
///
/// NaN passes through unchanged.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Evaluates `c[0] + c[1]·x + c[2]·x² + ...` by Horner's scheme.
pub fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .copied()
        .reduce(|acc, coefficient| mul_add(acc, x, coefficient))
        .unwrap_or(0.0)
}
