//! Jobs: an operation code plus its operands

use std::fmt;
use log::info;

use crate::error::{JobError, Result};
use crate::matrix::{EngineConfig, RingMatrix, Scalar};

/// Operation requested by a job file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// left + right
    Add,
    /// right × left
    Multiply,
    /// transpose of right
    Transpose,
    /// right scaled by a scalar
    Scale,
}

impl Operation {
    /// Parses the first character of an operation code, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().chars().next()?.to_ascii_uppercase() {
            'A' => Some(Operation::Add),
            'M' => Some(Operation::Multiply),
            'T' => Some(Operation::Transpose),
            'S' => Some(Operation::Scale),
            _ => None,
        }
    }

    /// One-letter code written to job and result files
    pub fn code(&self) -> char {
        match self {
            Operation::Add => 'A',
            Operation::Multiply => 'M',
            Operation::Transpose => 'T',
            Operation::Scale => 'S',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Left-hand operand of a job
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<T: Scalar> {
    Matrix(RingMatrix<T>),
    Scalar(T),
}

/// A parsed job, ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct Job<T: Scalar = i64> {
    pub op: Operation,
    pub right: RingMatrix<T>,
    pub left: Operand<T>,
}

impl<T: Scalar> Job<T> {
    /// Dimension shared by the operands
    pub fn dim(&self) -> usize {
        self.right.dim()
    }

    /// Runs the job, producing a fresh result matrix
    ///
    /// Multiplication goes through [`multiply_parallel`](crate::multiply_parallel)
    /// when the `parallel` feature is enabled.
    pub fn run(&self, config: &EngineConfig) -> Result<RingMatrix<T>, JobError> {
        info!(
            "running {} on {}×{} (right nnz {})",
            self.op,
            self.dim(),
            self.dim(),
            self.right.nnz()
        );

        let result = match (self.op, &self.left) {
            (Operation::Add, Operand::Matrix(left)) => left.add(&self.right)?,
            (Operation::Multiply, Operand::Matrix(left)) => multiply(&self.right, left, config)?,
            (Operation::Transpose, _) => self.right.transpose(),
            (Operation::Scale, Operand::Scalar(k)) => self.right.scale(*k)?,
            (op, _) => return Err(JobError::OperandKind(op)),
        };

        info!("result nnz {}", result.nnz());
        Ok(result)
    }
}

#[cfg(feature = "parallel")]
fn multiply<T: Scalar>(
    a: &RingMatrix<T>,
    b: &RingMatrix<T>,
    config: &EngineConfig,
) -> Result<RingMatrix<T>> {
    crate::parallel::multiply_parallel(a, b, config)
}

#[cfg(not(feature = "parallel"))]
fn multiply<T: Scalar>(
    a: &RingMatrix<T>,
    b: &RingMatrix<T>,
    _config: &EngineConfig,
) -> Result<RingMatrix<T>> {
    a.multiply(b)
}
