/// Absolute tolerance for meter comparisons.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

/// Asserts two meter values are equal within [`FLOAT_TOLERANCE`].
///
/// # Panics
///
/// Panics when the values differ by more than the tolerance.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= FLOAT_TOLERANCE,
        "expected {expected}, got {actual}"
    );
}
