//! Error types for the bit containers, the GF(2) solver and the puzzle layer

use std::time::Duration;
use thiserror::Error;

/// Failures while building or reading bit vectors and matrices
#[derive(Debug, Error)]
pub enum BitError {
    #[error("failed to allocate storage for {bits} bits")]
    Allocation { bits: usize },

    #[error("invalid character {found:?} at position {index}, only '0' and '1' are allowed")]
    InvalidCharacter { index: usize, found: char },

    #[error("row {row} is malformed")]
    MalformedRow {
        row: usize,
        #[source]
        source: Box<BitError>,
    },

    #[error("row {row} has width {width}, expected {expected} (all rows must have the same width)")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("input contains no rows")]
    Empty,

    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

/// Failures of the GF(2) elimination and minimum-weight search
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Bits(#[from] BitError),

    #[error("{free} free variables give too many assignments to enumerate")]
    SearchSpaceTooLarge { free: usize },

    #[error("search timed out after {:.3}s", .elapsed.as_secs_f64())]
    TimedOut { elapsed: Duration },

    #[error("search was cancelled")]
    Cancelled,
}

/// Failures of the Lights Off mapper and problem driver
#[derive(Debug, Error)]
pub enum LightsOffError {
    #[error(transparent)]
    Bits(#[from] BitError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("grid is {found:?} (rows x cols), expected {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("field must have at least one row and one column")]
    EmptyField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BitError::InvalidCharacter { index: 2, found: 'x' };
        assert_eq!(
            err.to_string(),
            "invalid character 'x' at position 2, only '0' and '1' are allowed"
        );

        let err = LightsOffError::DimensionMismatch {
            expected: (3, 3),
            found: (2, 3),
        };
        assert!(err.to_string().contains("(2, 3)"));
    }

    #[test]
    fn test_error_conversions() {
        let solve: SolveError = BitError::Empty.into();
        let top: LightsOffError = solve.into();
        assert_eq!(top.to_string(), "input contains no rows");
    }
}
