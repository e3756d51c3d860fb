//! Cells and handles for the cross-linked ring arena

use std::fmt::{Debug, Display};
use num_traits::{PrimInt, Signed};

/// Value type a [`RingMatrix`](super::RingMatrix) can hold: any signed primitive integer
pub trait Scalar: PrimInt + Signed + Debug + Display + Send + Sync {}

impl<T> Scalar for T where T: PrimInt + Signed + Debug + Display + Send + Sync {}

/// Index of a cell in the matrix arena
pub(crate) type CellId = usize;

/// A node of the arena
///
/// Data cells sit on exactly one row ring (linked through `right`) and one
/// column ring (linked through `down`). Sentinels use the same layout with a
/// zero coordinate on the axis they do not index: row sentinels have
/// `col == 0`, column sentinels have `row == 0`.
#[derive(Debug, Clone)]
pub(crate) struct Cell<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
    /// Next cell in the row ring
    pub right: CellId,
    /// Next cell in the column ring
    pub down: CellId,
}

impl<T: Scalar> Cell<T> {
    /// Head of an empty row ring, stored at `id`
    pub fn row_sentinel(row: usize, id: CellId) -> Self {
        Self {
            row,
            col: 0,
            value: T::zero(),
            right: id,
            down: id,
        }
    }

    /// Head of an empty column ring, stored at `id`
    pub fn col_sentinel(col: usize, id: CellId) -> Self {
        Self {
            row: 0,
            col,
            value: T::zero(),
            right: id,
            down: id,
        }
    }
}
