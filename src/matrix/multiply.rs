//! Matrix multiplication over row and column rings
//!
//! C[i, j] is the dot product of row i of A with column j of B. Rows of A
//! and columns of B that hold no cell are skipped outright; for the rest the
//! row ring of A is walked once and, for every A[i, k], the column ring of B
//! is searched from its head for row k, stopping as soon as it passes k.

use log::debug;

use super::cell::Scalar;
use super::ring::RingMatrix;
use crate::error::{MatrixError, Result};

impl<T: Scalar> RingMatrix<T> {
    /// Returns the product `self × other`
    ///
    /// # Examples
    ///
    /// ```
    /// use crossring::RingMatrix;
    ///
    /// let a = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, 1), (1, 2, 2)]).unwrap();
    /// let id = RingMatrix::<i64>::identity(2);
    ///
    /// assert_eq!(a.multiply(&id).unwrap(), a);
    /// ```
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.check_same_dim(other)?;

        let cols: Vec<usize> = other.populated_cols().collect();
        debug!(
            "multiply: {}×{}, nnz {} × {}, {} populated columns on the right",
            self.n,
            self.n,
            self.nnz(),
            other.nnz(),
            cols.len()
        );

        let mut result = Self::new(self.n);
        for i in self.populated_rows() {
            for &j in &cols {
                let sum = self.dot_row_col(i, other, j)?;
                if !sum.is_zero() {
                    result.upsert_at(i, j, sum);
                }
            }
        }
        Ok(result)
    }

    /// Dot product of row `i` of `self` with column `j` of `other`
    pub(crate) fn dot_row_col(&self, i: usize, other: &Self, j: usize) -> Result<T> {
        let head = other.col_head(j);
        let overflow = MatrixError::Overflow { row: i, col: j };

        let mut sum = T::zero();
        for (k, a) in self.row_iter(i) {
            let mut cur = other.cells[head].down;
            while cur != head && other.cells[cur].row < k {
                cur = other.cells[cur].down;
            }
            if cur != head && other.cells[cur].row == k {
                let product = a
                    .checked_mul(&other.cells[cur].value)
                    .ok_or_else(|| overflow.clone())?;
                sum = sum.checked_add(&product).ok_or_else(|| overflow.clone())?;
            }
        }
        Ok(sum)
    }
}
