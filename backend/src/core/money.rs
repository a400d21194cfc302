//! Monetary rounding
//!
//! All arithmetic inside a run is carried in `f64` without intermediate
//! rounding. Values are rounded to two decimals exactly once, when a
//! `SimulationResult` is produced.

/// Round to two decimal places, half-up (ties away from zero).
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::core::round2;
///
/// assert_eq!(round2(1.005_f64 + 1e-9), 1.01);
/// assert_eq!(round2(2.344), 2.34);
/// assert_eq!(round2(-2.345), -2.35);
/// ```
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value.abs() * 100.0;
    // Snap values that sit a few ulps under a tie (e.g. 2.675 * 100) back onto it
    let nudged = scaled + scaled * f64::EPSILON * 4.0;
    let rounded = value.signum() * (nudged + 0.5).floor() / 100.0;
    // Normalise -0.0 to 0.0
    rounded + 0.0
}

/// Mean of a slice, or 0 for an empty slice.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
