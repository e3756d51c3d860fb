//! # Parallel multiplication
//!
//! Spreads the dot products of [`RingMatrix::multiply`] over a Rayon pool.
//! Both operands are only read while the pool runs; the result matrix is
//! assembled afterwards on the calling thread, one populated row of the
//! left operand at a time.

use log::debug;
use rayon::prelude::*;

use crate::error::{MatrixError, Result};
use crate::matrix::{EngineConfig, RingMatrix, Scalar};

/// Computes `a × b` with row-level parallelism
///
/// Gives the same result as [`RingMatrix::multiply`]. When `a` has fewer
/// populated rows than `config.parallel_threshold` the sequential
/// algorithm is used directly.
///
/// Runs on the current Rayon pool when its size matches
/// `config.system_params.n_threads`, otherwise on a pool built for this
/// call. [`install_global_pool`] sizes the global pool once up front.
///
/// # Examples
///
/// ```
/// use crossring::{multiply_parallel, EngineConfig, RingMatrix};
///
/// let a = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, 1), (2, 2, 1)]).unwrap();
/// let b = RingMatrix::<i64>::from_triplets(2, vec![(1, 2, 2), (2, 1, 2)]).unwrap();
///
/// let config = EngineConfig::default().with_parallel_threshold(0);
/// let c = multiply_parallel(&a, &b, &config).unwrap();
///
/// assert_eq!(c, a.multiply(&b).unwrap());
/// ```
pub fn multiply_parallel<T: Scalar>(
    a: &RingMatrix<T>,
    b: &RingMatrix<T>,
    config: &EngineConfig,
) -> Result<RingMatrix<T>> {
    a.check_same_dim(b)?;

    let rows: Vec<usize> = a.populated_rows().collect();
    if rows.len() < config.parallel_threshold {
        return a.multiply(b);
    }

    let cols: Vec<usize> = b.populated_cols().collect();
    debug!(
        "multiply_parallel: {} populated rows × {} populated columns on {} threads",
        rows.len(),
        cols.len(),
        config.system_params.n_threads
    );

    let compute = || {
        rows.par_iter()
            .map(|&i| -> Result<Vec<(usize, T)>> {
                let mut entries = Vec::new();
                for &j in &cols {
                    let sum = a.dot_row_col(i, b, j)?;
                    if !sum.is_zero() {
                        entries.push((j, sum));
                    }
                }
                Ok(entries)
            })
            .collect::<Result<Vec<_>>>()
    };

    // Only build a dedicated pool when the current one has the wrong size
    let row_results: Vec<Vec<(usize, T)>> =
        if rayon::current_num_threads() == config.system_params.n_threads {
            compute()?
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.system_params.n_threads)
                .build()
                .map_err(|e| MatrixError::ThreadPool(e.to_string()))?
                .install(compute)?
        };

    let mut result = RingMatrix::new(a.dim());
    for (&i, entries) in rows.iter().zip(row_results) {
        for (j, v) in entries {
            result.upsert_at(i, j, v);
        }
    }
    Ok(result)
}

/// Sizes Rayon's global pool from `config`
///
/// Must run before anything else touches the global pool.
pub fn install_global_pool(config: &EngineConfig) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.system_params.n_threads)
        .build_global()
        .map_err(|e| MatrixError::ThreadPool(e.to_string()))?;
    debug!("global pool: {} threads", config.system_params.n_threads);
    Ok(())
}
