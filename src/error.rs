//! Error types for ring matrices and the job format
//!
//! Every failure is a caller error: an index outside the matrix, operands
//! of different dimension, integer overflow, or a malformed job file.

use thiserror::Error;

/// Errors raised by [`RingMatrix`](crate::RingMatrix) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Index ({row}, {col}) out of range for a {dim}×{dim} matrix (indices are 1-based)")]
    OutOfRange { row: usize, col: usize, dim: usize },

    #[error("Dimension mismatch: {left}×{left} vs {right}×{right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Integer overflow computing entry ({row}, {col})")]
    Overflow { row: usize, col: usize },

    #[error("Corrupt {ring} ring {index}: {reason}")]
    CorruptRing {
        ring: RingKind,
        index: usize,
        reason: String,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Which family of rings a [`MatrixError::CorruptRing`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Row,
    Column,
}

impl std::fmt::Display for RingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingKind::Row => write!(f, "row"),
            RingKind::Column => write!(f, "column"),
        }
    }
}

/// Errors raised while reading, running or writing a job file
#[derive(Error, Debug)]
pub enum JobError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing header line (expected `<OP>,<n>`)")]
    MissingHeader,

    #[error("Unknown operation code `{0}` (expected A, M, T or S)")]
    UnknownOperation(String),

    #[error("Operation {0} cannot take this kind of left operand")]
    OperandKind(crate::io::Operation),

    #[error("Line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Line {line}: {source}")]
    Entry {
        line: u64,
        #[source]
        source: MatrixError,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Result alias defaulting to [`MatrixError`]
pub type Result<T, E = MatrixError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = MatrixError::OutOfRange { row: 4, col: 1, dim: 3 };
        assert_eq!(
            err.to_string(),
            "Index (4, 1) out of range for a 3×3 matrix (indices are 1-based)"
        );

        let err = MatrixError::CorruptRing {
            ring: RingKind::Column,
            index: 2,
            reason: "rows not increasing".to_string(),
        };
        assert_eq!(err.to_string(), "Corrupt column ring 2: rows not increasing");
    }

    #[test]
    fn test_job_error_wraps_matrix_error() {
        let err: JobError = MatrixError::DimensionMismatch { left: 2, right: 3 }.into();
        assert!(matches!(err, JobError::Matrix(MatrixError::DimensionMismatch { .. })));
        assert_eq!(err.to_string(), "Dimension mismatch: 2×2 vs 3×3");
    }
}
