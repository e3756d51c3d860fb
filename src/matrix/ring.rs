//! Orthogonal-list sparse matrix built from cross-linked circular rings
//!
//! Every row and every column owns a sentinel that heads a circular,
//! singly-linked ring of the non-zero cells on that line. Row rings are
//! sorted by column, column rings by row, and each data cell belongs to
//! exactly one of each, so the two families are two views of one cell set.
//!
//! Cells live in a `Vec` arena addressed by [`CellId`]:
//!
//! ```text
//!   0 .. n        row sentinels     (row r    -> r - 1)
//!   n .. 2n       column sentinels  (column c -> n + c - 1)
//!   2n ..         data cells
//! ```
//!
//! Indices are 1-based. `upsert`, `get` and `remove` reject indices outside
//! `1..=n` with [`MatrixError::OutOfRange`]; the ring walkers `row_iter` and
//! `col_iter` panic on them instead.

use std::fmt;
use log::trace;

use super::cell::{Cell, CellId, Scalar};
use crate::error::{MatrixError, Result, RingKind};

/// A square sparse matrix stored as cross-linked row and column rings
///
/// Zero is never stored: writing zero to a cell unlinks and discards it.
///
/// # Examples
///
/// ```
/// use crossring::RingMatrix;
///
/// let mut m = RingMatrix::<i64>::new(3);
/// m.upsert(2, 3, 7).unwrap();
/// m.upsert(2, 1, -1).unwrap();
///
/// assert_eq!(m.get(2, 3).unwrap(), 7);
/// assert_eq!(m.get(1, 1).unwrap(), 0);
/// assert_eq!(m.row_iter(2).collect::<Vec<_>>(), vec![(1, -1), (3, 7)]);
/// ```
#[derive(Clone)]
pub struct RingMatrix<T = i64> {
    /// Dimension of the matrix
    pub(super) n: usize,

    /// Sentinels followed by data cells
    pub(super) cells: Vec<Cell<T>>,
}

impl<T: Scalar> RingMatrix<T> {
    /// Creates an empty n×n matrix
    ///
    /// # Panics
    ///
    /// Panics if the 2n sentinels cannot be allocated. Job files are
    /// bounded by [`MAX_DIM`](crate::io::MAX_DIM) before reaching here.
    pub fn new(n: usize) -> Self {
        let mut cells = Vec::with_capacity(2 * n);
        for r in 1..=n {
            cells.push(Cell::row_sentinel(r, r - 1));
        }
        for c in 1..=n {
            cells.push(Cell::col_sentinel(c, n + c - 1));
        }
        Self { n, cells }
    }

    /// Creates the n×n identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n);
        for i in 1..=n {
            m.upsert_at(i, i, T::one());
        }
        m
    }

    /// Builds a matrix from unordered `(row, col, value)` triples
    ///
    /// Triples for the same coordinate are summed; a sum of exactly zero
    /// leaves no cell behind.
    pub fn from_triplets<I>(n: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut m = Self::new(n);
        for (r, c, v) in entries {
            if v.is_zero() {
                continue;
            }
            m.accumulate(r, c, v)?;
        }
        Ok(m)
    }

    /// Returns the dimension n of this n×n matrix
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Returns the number of stored (non-zero) cells
    pub fn nnz(&self) -> usize {
        self.cells.len() - 2 * self.n
    }

    /// Returns true if no cell is stored
    pub fn is_empty(&self) -> bool {
        self.nnz() == 0
    }

    /// Sets the value at (r, c), inserting, overwriting or deleting as needed
    ///
    /// Writing zero removes the cell if present and is a no-op otherwise.
    pub fn upsert(&mut self, r: usize, c: usize, v: T) -> Result<()> {
        self.check_index(r, c)?;
        self.upsert_at(r, c, v);
        Ok(())
    }

    /// Returns the value at (r, c), or zero if no cell is stored there
    ///
    /// The walk stops at the first column past `c`, so it relies on the row
    /// ring being sorted. Use [`validate`](Self::validate) to check that.
    pub fn get(&self, r: usize, c: usize) -> Result<T> {
        self.check_index(r, c)?;
        let head = self.row_head(r);
        let mut cur = self.cells[head].right;
        while cur != head {
            let cell = &self.cells[cur];
            if cell.col == c {
                return Ok(cell.value);
            }
            if cell.col > c {
                break;
            }
            cur = cell.right;
        }
        Ok(T::zero())
    }

    /// Removes the cell at (r, c); removing an absent cell is a no-op
    pub fn remove(&mut self, r: usize, c: usize) -> Result<()> {
        self.upsert(r, c, T::zero())
    }

    /// Adds `v` to the value at (r, c)
    ///
    /// Fails with [`MatrixError::Overflow`] instead of wrapping.
    pub fn accumulate(&mut self, r: usize, c: usize, v: T) -> Result<()> {
        let sum = self
            .get(r, c)?
            .checked_add(&v)
            .ok_or(MatrixError::Overflow { row: r, col: c })?;
        self.upsert_at(r, c, sum);
        Ok(())
    }

    /// Iterates over row `r` as `(col, value)` pairs in ascending column order
    ///
    /// # Panics
    ///
    /// Panics if `r` is not in `1..=n`.
    pub fn row_iter(&self, r: usize) -> RowIter<'_, T> {
        assert!(r >= 1 && r <= self.n, "Row index {} out of bounds (n = {})", r, self.n);
        let head = self.row_head(r);
        RowIter {
            cells: &self.cells,
            head,
            cur: self.cells[head].right,
        }
    }

    /// Iterates over column `c` as `(row, value)` pairs in ascending row order
    ///
    /// # Panics
    ///
    /// Panics if `c` is not in `1..=n`.
    pub fn col_iter(&self, c: usize) -> ColIter<'_, T> {
        assert!(c >= 1 && c <= self.n, "Column index {} out of bounds (n = {})", c, self.n);
        let head = self.col_head(c);
        ColIter {
            cells: &self.cells,
            head,
            cur: self.cells[head].down,
        }
    }

    /// Returns true if row `r` stores no cell
    ///
    /// # Panics
    ///
    /// Panics if `r` is not in `1..=n`.
    pub fn row_is_empty(&self, r: usize) -> bool {
        assert!(r >= 1 && r <= self.n, "Row index {} out of bounds (n = {})", r, self.n);
        let head = self.row_head(r);
        self.cells[head].right == head
    }

    /// Returns true if column `c` stores no cell
    ///
    /// # Panics
    ///
    /// Panics if `c` is not in `1..=n`.
    pub fn col_is_empty(&self, c: usize) -> bool {
        assert!(c >= 1 && c <= self.n, "Column index {} out of bounds (n = {})", c, self.n);
        let head = self.col_head(c);
        self.cells[head].down == head
    }

    /// Iterates over the rows holding at least one cell
    pub fn populated_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.n).filter(move |&r| !self.row_is_empty(r))
    }

    /// Iterates over the columns holding at least one cell
    pub fn populated_cols(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.n).filter(move |&c| !self.col_is_empty(c))
    }

    /// Iterates over all cells as `(row, col, value)`, rows ascending and
    /// columns ascending within a row
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (1..=self.n).flat_map(move |r| self.row_iter(r).map(move |(c, v)| (r, c, v)))
    }

    /// Checks the ring invariants
    ///
    /// Every row ring must be strictly increasing in column and hold only
    /// cells of that row, every column ring likewise, no stored value may be
    /// zero, and every data cell must be reachable exactly once from its row
    /// ring and once from its column ring.
    pub fn validate(&self) -> Result<()> {
        let base = 2 * self.n;
        let mut seen_in_rows = vec![false; self.nnz()];
        let mut seen_in_cols = vec![false; self.nnz()];

        for r in 1..=self.n {
            let corrupt = |reason: String| MatrixError::CorruptRing {
                ring: RingKind::Row,
                index: r,
                reason,
            };
            let head = self.row_head(r);
            let mut last_col = 0;
            let mut cur = self.cells[head].right;
            while cur != head {
                if cur < base || cur >= self.cells.len() {
                    return Err(corrupt(format!("link to non-data handle {}", cur)));
                }
                let cell = &self.cells[cur];
                if seen_in_rows[cur - base] {
                    return Err(corrupt(format!("cell {} linked twice", cur)));
                }
                seen_in_rows[cur - base] = true;
                if cell.row != r {
                    return Err(corrupt(format!("holds a cell of row {}", cell.row)));
                }
                if cell.col <= last_col || cell.col > self.n {
                    return Err(corrupt(format!("column {} after column {}", cell.col, last_col)));
                }
                if cell.value.is_zero() {
                    return Err(corrupt(format!("zero stored at column {}", cell.col)));
                }
                last_col = cell.col;
                cur = cell.right;
            }
        }

        for c in 1..=self.n {
            let corrupt = |reason: String| MatrixError::CorruptRing {
                ring: RingKind::Column,
                index: c,
                reason,
            };
            let head = self.col_head(c);
            let mut last_row = 0;
            let mut cur = self.cells[head].down;
            while cur != head {
                if cur < base || cur >= self.cells.len() {
                    return Err(corrupt(format!("link to non-data handle {}", cur)));
                }
                let cell = &self.cells[cur];
                if seen_in_cols[cur - base] {
                    return Err(corrupt(format!("cell {} linked twice", cur)));
                }
                seen_in_cols[cur - base] = true;
                if cell.col != c {
                    return Err(corrupt(format!("holds a cell of column {}", cell.col)));
                }
                if cell.row <= last_row || cell.row > self.n {
                    return Err(corrupt(format!("row {} after row {}", cell.row, last_row)));
                }
                last_row = cell.row;
                cur = cell.down;
            }
        }

        let orphan = (0..self.nnz()).find(|&k| !seen_in_rows[k] || !seen_in_cols[k]);
        if let Some(k) = orphan {
            let cell = &self.cells[base + k];
            let (ring, index) = if seen_in_rows[k] {
                (RingKind::Column, cell.col)
            } else {
                (RingKind::Row, cell.row)
            };
            return Err(MatrixError::CorruptRing {
                ring,
                index,
                reason: format!("cell ({}, {}) is not linked", cell.row, cell.col),
            });
        }

        Ok(())
    }

    #[inline]
    pub(super) fn row_head(&self, r: usize) -> CellId {
        r - 1
    }

    #[inline]
    pub(super) fn col_head(&self, c: usize) -> CellId {
        self.n + c - 1
    }

    fn check_index(&self, r: usize, c: usize) -> Result<()> {
        if r == 0 || c == 0 || r > self.n || c > self.n {
            return Err(MatrixError::OutOfRange {
                row: r,
                col: c,
                dim: self.n,
            });
        }
        Ok(())
    }

    /// Upsert for indices already known to be in range
    pub(crate) fn upsert_at(&mut self, r: usize, c: usize, v: T) {
        let head = self.row_head(r);
        let (left, cur) = self.seek_in_row(r, c);

        if cur != head && self.cells[cur].col == c {
            if v.is_zero() {
                trace!("unlink ({}, {})", r, c);
                self.cells[left].right = self.cells[cur].right;
                self.unlink_from_column(cur);
                self.discard(cur);
            } else {
                self.cells[cur].value = v;
            }
            return;
        }

        if v.is_zero() {
            return;
        }

        trace!("link ({}, {}) = {}", r, c, v);
        let id = self.cells.len();
        let (up, below) = self.seek_in_col(c, r);
        self.cells.push(Cell {
            row: r,
            col: c,
            value: v,
            right: cur,
            down: below,
        });
        self.cells[left].right = id;
        self.cells[up].down = id;
    }

    /// Walks row `r` to column `c`
    ///
    /// Returns `(left, cur)` where `cur` is the cell at column `c` if present,
    /// otherwise the first cell past `c` (or the sentinel), and `left` is the
    /// cell before it.
    fn seek_in_row(&self, r: usize, c: usize) -> (CellId, CellId) {
        let head = self.row_head(r);
        let mut left = head;
        let mut cur = self.cells[head].right;
        while cur != head && self.cells[cur].col < c {
            left = cur;
            cur = self.cells[cur].right;
        }
        (left, cur)
    }

    /// Column counterpart of [`seek_in_row`](Self::seek_in_row)
    fn seek_in_col(&self, c: usize, r: usize) -> (CellId, CellId) {
        let head = self.col_head(c);
        let mut up = head;
        let mut cur = self.cells[head].down;
        while cur != head && self.cells[cur].row < r {
            up = cur;
            cur = self.cells[cur].down;
        }
        (up, cur)
    }

    /// Splices `target` out of its column ring; a no-op if it is not there
    fn unlink_from_column(&mut self, target: CellId) {
        let head = self.col_head(self.cells[target].col);
        let mut up = head;
        let mut cur = self.cells[head].down;
        while cur != head && cur != target {
            up = cur;
            cur = self.cells[cur].down;
        }
        if cur == target {
            self.cells[up].down = self.cells[target].down;
        }
    }

    /// Drops an already unlinked cell from the arena
    ///
    /// The last cell is moved into the freed slot, so its row and column
    /// predecessors are repointed first.
    fn discard(&mut self, id: CellId) {
        let last = self.cells.len() - 1;
        if id != last {
            let (row, col) = (self.cells[last].row, self.cells[last].col);

            let mut left = self.row_head(row);
            while self.cells[left].right != last {
                left = self.cells[left].right;
            }
            self.cells[left].right = id;

            let mut up = self.col_head(col);
            while self.cells[up].down != last {
                up = self.cells[up].down;
            }
            self.cells[up].down = id;
        }
        self.cells.swap_remove(id);
    }
}

impl<T: Scalar> PartialEq for RingMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.nnz() == other.nnz() && self.triplets().eq(other.triplets())
    }
}

impl<T: Scalar> Eq for RingMatrix<T> {}

impl<T: Scalar> fmt::Debug for RingMatrix<T> {
    /// Shows the dimension, the cell count and the first few cells in
    /// row-major order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 8;

        let cells: Vec<_> = self.triplets().take(SHOWN).collect();
        let mut s = f.debug_struct("RingMatrix");
        s.field("n", &self.n)
            .field("nnz", &self.nnz())
            .field("cells", &cells);
        if self.nnz() > SHOWN {
            s.finish_non_exhaustive()
        } else {
            s.finish()
        }
    }
}

/// Walk over one row ring, see [`RingMatrix::row_iter`]
pub struct RowIter<'a, T> {
    cells: &'a [Cell<T>],
    head: CellId,
    cur: CellId,
}

impl<'a, T: Copy> Iterator for RowIter<'a, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.head {
            return None;
        }
        let cell = &self.cells[self.cur];
        self.cur = cell.right;
        Some((cell.col, cell.value))
    }
}

/// Walk over one column ring, see [`RingMatrix::col_iter`]
pub struct ColIter<'a, T> {
    cells: &'a [Cell<T>],
    head: CellId,
    cur: CellId,
}

impl<'a, T: Copy> Iterator for ColIter<'a, T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.head {
            return None;
        }
        let cell = &self.cells[self.cur];
        self.cur = cell.down;
        Some((cell.row, cell.value))
    }
}
