//! Conversions between ring matrices and external matrix crates
//!
//! `sprs` and `ndarray` index from 0; ring matrices index from 1. Explicit
//! zeros in the source are dropped.

use ndarray::Array2;
use sprs::CsMat;

use crate::error::{MatrixError, Result};
use crate::matrix::{RingMatrix, Scalar};

/// Converts a ring matrix to sprs CsMat in CSR storage
pub fn to_sprs_csr<T: Scalar>(matrix: &RingMatrix<T>) -> CsMat<T> {
    let n = matrix.dim();
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());

    indptr.push(0);
    for r in 1..=n {
        for (c, v) in matrix.row_iter(r) {
            indices.push(c - 1);
            data.push(v);
        }
        indptr.push(indices.len());
    }

    CsMat::new((n, n), indptr, indices, data)
}

/// Converts a square sprs CsMat (CSR or CSC storage) to a ring matrix
///
/// Duplicate entries are summed.
pub fn from_sprs<T: Scalar>(matrix: &CsMat<T>) -> Result<RingMatrix<T>> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(MatrixError::DimensionMismatch {
            left: rows,
            right: cols,
        });
    }

    let mut result = RingMatrix::new(rows);
    for (&v, (r, c)) in matrix.iter() {
        if !v.is_zero() {
            result.accumulate(r + 1, c + 1, v)?;
        }
    }
    Ok(result)
}

/// Expands a ring matrix into a dense ndarray
pub fn to_dense<T: Scalar>(matrix: &RingMatrix<T>) -> Array2<T> {
    let n = matrix.dim();
    let mut dense = Array2::zeros((n, n));
    for (r, c, v) in matrix.triplets() {
        dense[[r - 1, c - 1]] = v;
    }
    dense
}

/// Collects the non-zero entries of a square ndarray into a ring matrix
pub fn from_dense<T: Scalar>(dense: &Array2<T>) -> Result<RingMatrix<T>> {
    let (rows, cols) = dense.dim();
    if rows != cols {
        return Err(MatrixError::DimensionMismatch {
            left: rows,
            right: cols,
        });
    }

    let mut result = RingMatrix::new(rows);
    for ((i, j), &v) in dense.indexed_iter() {
        if !v.is_zero() {
            result.upsert(i + 1, j + 1, v)?;
        }
    }
    Ok(result)
}
