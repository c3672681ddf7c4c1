//! Progress reporting for grid operations.

/// Receives the completed fraction of a grid operation once per output row.
///
/// Returning `false` asks the operation to stop; the driver then fails with
/// [`GridError::UserInterrupt`](crate::GridError::UserInterrupt).
pub trait Progress {
    fn report(&mut self, fraction: f64) -> bool;
}

impl<F> Progress for F
where
    F: FnMut(f64) -> bool,
{
    fn report(&mut self, fraction: f64) -> bool {
        self(fraction)
    }
}

/// A reporter that never interrupts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f64) -> bool {
        true
    }
}

/// Fraction reported after finishing `row` of `rows`.
///
/// Row `k` reports `k / (rows - 1)`. A single-row grid reports 1.0 instead of
/// dividing by zero.
pub(crate) fn row_fraction(row: usize, rows: usize) -> f64 {
    if rows <= 1 {
        1.0
    } else {
        row as f64 / (rows - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fraction() {
        assert_eq!(row_fraction(0, 1), 1.0);
        assert_eq!(row_fraction(0, 5), 0.0);
        assert_eq!(row_fraction(2, 5), 0.5);
        assert_eq!(row_fraction(4, 5), 1.0);
    }

    #[test]
    fn test_closure_progress() {
        let mut seen = Vec::new();
        let mut reporter = |f: f64| {
            seen.push(f);
            f < 0.5
        };
        assert!(reporter.report(0.25));
        assert!(!reporter.report(0.75));
        assert_eq!(seen, vec![0.25, 0.75]);
        assert!(NoProgress.report(1.0));
    }
}
