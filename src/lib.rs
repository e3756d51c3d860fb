//! # crossring: sparse matrices on cross-linked rings
//!
//! crossring stores a square integer matrix as an orthogonal list: every
//! row and every column heads a sorted circular ring of its non-zero cells,
//! and each cell sits on one row ring and one column ring at once. Zero is
//! never stored.
//!
//! ## Overview
//!
//! - Point updates, lookups and removals walk a single row ring
//! - Addition, scaling, transpose and multiplication never build a dense
//!   matrix; they walk rings and write into a fresh result
//! - Multiplication skips empty rows of the left operand and empty columns
//!   of the right one, and can spread its dot products over a Rayon pool
//! - Integer overflow is reported, never wrapped
//!
//! ## Usage
//!
//! ```
//! use crossring::RingMatrix;
//!
//! let a = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, 1), (1, 2, 2), (2, 1, 3), (2, 2, 4)]).unwrap();
//! let b = RingMatrix::<i64>::from_triplets(2, vec![(1, 1, 5), (2, 2, 6)]).unwrap();
//!
//! let sum = a.add(&b).unwrap();
//! assert_eq!(sum.get(2, 2).unwrap(), 10);
//!
//! let product = a.multiply(&b).unwrap();
//! assert_eq!(
//!     product.triplets().collect::<Vec<_>>(),
//!     vec![(1, 1, 5), (1, 2, 12), (2, 1, 15), (2, 2, 24)]
//! );
//! ```
//!
//! Job files pair an operation code with its operands:
//!
//! ```
//! use crossring::{read_job, write_result, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let job = read_job::<i64, _>("T,2\n,,\n1,2,3\n,,\n".as_bytes(), &config).unwrap();
//! let result = job.run(&config).unwrap();
//!
//! let mut out = Vec::new();
//! write_result(&mut out, job.op, &result, &config).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "T,2\n2,1,3\n");
//! ```

pub mod error;
pub mod io;
pub mod matrix;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{JobError, MatrixError, Result, RingKind};
pub use io::{read_job, write_result, Job, Operand, Operation};
pub use matrix::{ColIter, EngineConfig, RingMatrix, RowIter, Scalar, SystemParameters};
#[cfg(feature = "parallel")]
pub use parallel::{install_global_pool, multiply_parallel};
pub use utils::{from_dense, from_sprs, to_dense, to_sprs_csr};

/// Version information for the crossring library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
