//! Tolerance checks for grid values.

/// Tolerance for values that follow from exact arithmetic on small inputs.
pub const TIGHT: f64 = 1e-9;

/// Assert `actual` is within `tolerance` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} (+/- {}), got {}",
        expected,
        tolerance,
        actual
    );
}

/// Assert a row-major grid matches `expected` cell by cell.
pub fn assert_grid_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "cell count");
    for (cell, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "cell {}: expected {} (+/- {}), got {}",
            cell,
            e,
            tolerance,
            a
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_close() {
        assert_close(1.0, 1.0 + 1e-12, TIGHT);
        assert_grid_close(&[1.0, 2.0], &[1.001, 1.999], 0.01);
    }

    #[test]
    #[should_panic(expected = "cell 1")]
    fn test_grid_mismatch_names_cell() {
        assert_grid_close(&[1.0, 2.0], &[1.0, 2.5], TIGHT);
    }
}
