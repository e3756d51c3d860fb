//! Addition, scalar multiplication and transpose
//!
//! Each operation reads its operands and writes into a freshly built
//! result matrix; operands are never modified.

use log::debug;

use super::cell::Scalar;
use super::ring::RingMatrix;
use crate::error::{MatrixError, Result};

impl<T: Scalar> RingMatrix<T> {
    /// Returns `self + other`, omitting entries that cancel to zero
    ///
    /// # Examples
    ///
    /// ```
    /// use crossring::RingMatrix;
    ///
    /// let a = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, 2), (2, 1, 1)]).unwrap();
    /// let b = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, -2), (2, 2, 3)]).unwrap();
    ///
    /// let c = a.add(&b).unwrap();
    /// assert_eq!(c.triplets().collect::<Vec<_>>(), vec![(2, 1, 1), (2, 2, 3)]);
    /// ```
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_dim(other)?;
        debug!(
            "add: {}×{}, nnz {} + {}",
            self.n,
            self.n,
            self.nnz(),
            other.nnz()
        );

        let mut result = Self::new(self.n);
        for (r, c, v) in self.triplets() {
            result.upsert_at(r, c, v);
        }
        for (r, c, v) in other.triplets() {
            result.accumulate(r, c, v)?;
        }
        Ok(result)
    }

    /// Returns `self * k`
    ///
    /// Scaling by zero yields an empty matrix without visiting any cell.
    pub fn scale(&self, k: T) -> Result<Self> {
        debug!("scale: {}×{}, nnz {}, k = {}", self.n, self.n, self.nnz(), k);

        let mut result = Self::new(self.n);
        if k.is_zero() {
            return Ok(result);
        }

        for (r, c, v) in self.triplets() {
            let scaled = v
                .checked_mul(&k)
                .ok_or(MatrixError::Overflow { row: r, col: c })?;
            if !scaled.is_zero() {
                result.upsert_at(r, c, scaled);
            }
        }
        Ok(result)
    }

    /// Returns the transpose: every cell (r, c) moves to (c, r)
    pub fn transpose(&self) -> Self {
        debug!("transpose: {}×{}, nnz {}", self.n, self.n, self.nnz());

        let mut result = Self::new(self.n);
        for (r, c, v) in self.triplets() {
            result.upsert_at(c, r, v);
        }
        result
    }

    pub(crate) fn check_same_dim(&self, other: &Self) -> Result<()> {
        if self.n != other.n {
            return Err(MatrixError::DimensionMismatch {
                left: self.n,
                right: other.n,
            });
        }
        Ok(())
    }
}
