//! Dense matrix storage and cheap logical views.
//!
//! [`Matrix`] is the only type that owns storage. Every other type in this
//! module is a *view*: a value type that borrows a base [`Entries`]
//! implementor and indirects access through it, per spec.md §9 ("Permuted
//! views vs. physical moves"). [`PermutedMatrix`] is the workhorse used by
//! every algorithm in this workspace — it owns one [`Matrix`] plus a pair of
//! [`Permutation`]s, so reordering rows/columns is O(1) and only a
//! [`PermutedMatrix::pivot`] (or an explicit [`PermutedMatrix::materialize`])
//! physically touches storage.

use crate::permutation::Permutation;

/// Minimal read access shared by every matrix view in this crate.
///
/// Implementors need not be `Sized`-free; call sites take `&impl Entries` or
/// `&dyn Entries` depending on whether the view is known statically.
pub trait Entries {
    /// Number of rows.
    fn num_rows(&self) -> usize;
    /// Number of columns.
    fn num_cols(&self) -> usize;
    /// The entry at logical `(row, col)`.
    fn entry(&self, row: usize, col: usize) -> i64;

    /// Convenience: whether `entry(row, col) != 0`.
    #[inline]
    fn is_nonzero(&self, row: usize, col: usize) -> bool {
        self.entry(row, col) != 0
    }
}

/// Owned dense matrix of small integers.
///
/// Domain is `{-1,0,+1}` for a signed input matrix, `{0,1}` for a support
/// matrix; this type does not enforce either — callers validate at the
/// boundary (see `tu-core::error::CoreError::DomainViolation`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// A zero matrix of the given dimensions.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build a matrix from row-major data. `data.len()` must equal `rows * cols`.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    #[must_use]
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<i64>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major data length mismatch");
        Self { rows, cols, data }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    /// Replace every nonzero entry by `1`, in place.
    pub fn take_support_mut(&mut self) {
        for v in &mut self.data {
            if *v != 0 {
                *v = 1;
            }
        }
    }

    /// The `{0,1}` support matrix, leaving `self` untouched.
    #[must_use]
    pub fn support(&self) -> Self {
        let mut out = self.clone();
        out.take_support_mut();
        out
    }
}

impl Entries for Matrix {
    #[inline]
    fn num_rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn num_cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn entry(&self, row: usize, col: usize) -> i64 {
        self.get(row, col)
    }
}

/// A square submatrix witness, in the *original* coordinate system.
///
/// Rows/columns are not assumed sorted by callers other than signing, which
/// happens to insert them via a `BTreeSet`-like accumulation; downstream
/// consumers should not rely on ordering beyond "same order as produced".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SubmatrixIndices {
    /// Row indices, in the coordinate system of the original input matrix.
    pub rows: Vec<usize>,
    /// Column indices, in the coordinate system of the original input matrix.
    pub columns: Vec<usize>,
}

impl SubmatrixIndices {
    /// Number of rows (equivalently columns, for a well-formed square witness).
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Gather the submatrix these indices describe out of `source`.
    #[must_use]
    pub fn gather(&self, source: &Matrix) -> Matrix {
        let mut out = Matrix::zeros(self.rows.len(), self.columns.len());
        for (oi, &r) in self.rows.iter().enumerate() {
            for (oj, &c) in self.columns.iter().enumerate() {
                out.set(oi, oj, source.get(r, c));
            }
        }
        out
    }
}

/// A logical row/column-permuted view over an owned [`Matrix`].
///
/// This is the type every algorithm in the workspace actually operates on:
/// row/column reordering (`swap_rows`/`swap_cols`) is O(1), and a
/// [`PermutedMatrix::pivot`] is the only operation that writes to the
/// underlying storage.
#[derive(Clone, Debug)]
pub struct PermutedMatrix {
    base: Matrix,
    row_perm: Permutation,
    col_perm: Permutation,
}

impl PermutedMatrix {
    /// Wrap `base` with identity permutations.
    #[must_use]
    pub fn new(base: Matrix) -> Self {
        let row_perm = Permutation::identity(base.rows());
        let col_perm = Permutation::identity(base.cols());
        Self {
            base,
            row_perm,
            col_perm,
        }
    }

    #[inline]
    #[must_use]
    pub fn row_perm(&self) -> &Permutation {
        &self.row_perm
    }

    #[inline]
    #[must_use]
    pub fn col_perm(&self) -> &Permutation {
        &self.col_perm
    }

    #[inline]
    #[must_use]
    pub fn row_perm_mut(&mut self) -> &mut Permutation {
        &mut self.row_perm
    }

    #[inline]
    #[must_use]
    pub fn col_perm_mut(&mut self) -> &mut Permutation {
        &mut self.col_perm
    }

    /// Borrow the underlying (unpermuted) storage, in original coordinates.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &Matrix {
        &self.base
    }

    /// Consume this view, returning the underlying storage in original
    /// coordinates (not the logically-permuted view).
    #[must_use]
    pub fn into_base(self) -> Matrix {
        self.base
    }

    /// The real row index underlying logical row `i`.
    #[inline]
    #[must_use]
    pub fn real_row(&self, i: usize) -> usize {
        self.row_perm.at(i)
    }

    /// The real column index underlying logical column `j`.
    #[inline]
    #[must_use]
    pub fn real_col(&self, j: usize) -> usize {
        self.col_perm.at(j)
    }

    #[inline]
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.row_perm.swap(i, j);
    }

    #[inline]
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.col_perm.swap(i, j);
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        let r = self.real_row(row);
        let c = self.real_col(col);
        self.base.set(r, c, value);
    }

    /// Binary pivot on logical `(i, j)`.
    ///
    /// Requires `entry(i, j) != 0` (checked; violating it is an
    /// [`crate::error::CoreError::InvariantBroken`], not a caller-facing
    /// failure). For every other row `r` with a nonzero in column `j` and
    /// every other column `c` with a nonzero in row `i`, flips
    /// `M[r,c] = 1 - M[r,c]`. Does **not** swap element labels; callers pair
    /// this with [`crate::matroid::MatroidHandle::swap_labels_on_pivot`].
    ///
    /// # Errors
    /// Returns [`crate::error::CoreError::InvariantBroken`] if `entry(i,j) == 0`.
    pub fn pivot(&mut self, i: usize, j: usize) -> crate::error::CoreResult<()> {
        if self.entry(i, j) == 0 {
            return Err(crate::error::CoreError::InvariantBroken(
                "binary pivot attempted on a zero entry",
            ));
        }
        let rows = self.num_rows();
        let cols = self.num_cols();
        // Collect first (read), then write: rows/cols beyond (i,j) are read
        // against the pre-pivot matrix only.
        let col_j_rows: Vec<usize> = (0..rows).filter(|&r| r != i && self.entry(r, j) != 0).collect();
        let row_i_cols: Vec<usize> = (0..cols).filter(|&c| c != j && self.entry(i, c) != 0).collect();
        for &r in &col_j_rows {
            for &c in &row_i_cols {
                let v = self.entry(r, c);
                self.set(r, c, 1 - v);
            }
        }
        Ok(())
    }

    /// Materialize the current logical view into a fresh owned [`Matrix`],
    /// collapsing both permutations to identity.
    #[must_use]
    pub fn materialize(&self) -> Matrix {
        let mut out = Matrix::zeros(self.num_rows(), self.num_cols());
        for i in 0..self.num_rows() {
            for j in 0..self.num_cols() {
                out.set(i, j, self.entry(i, j));
            }
        }
        out
    }

    /// Map a contiguous logical row range to real row indices (original coordinates).
    #[must_use]
    pub fn real_rows(&self, range: std::ops::Range<usize>) -> Vec<usize> {
        range.map(|i| self.real_row(i)).collect()
    }

    /// Map a contiguous logical column range to real column indices (original coordinates).
    #[must_use]
    pub fn real_cols(&self, range: std::ops::Range<usize>) -> Vec<usize> {
        range.map(|j| self.real_col(j)).collect()
    }
}

impl Entries for PermutedMatrix {
    #[inline]
    fn num_rows(&self) -> usize {
        self.base.rows()
    }
    #[inline]
    fn num_cols(&self) -> usize {
        self.base.cols()
    }
    #[inline]
    fn entry(&self, row: usize, col: usize) -> i64 {
        self.base.get(self.real_row(row), self.real_col(col))
    }
}

/// A transposed view over any [`Entries`] base.
pub struct TransposedView<'a, E: Entries> {
    base: &'a E,
}

impl<'a, E: Entries> TransposedView<'a, E> {
    #[must_use]
    pub fn new(base: &'a E) -> Self {
        Self { base }
    }
}

impl<'a, E: Entries> Entries for TransposedView<'a, E> {
    #[inline]
    fn num_rows(&self) -> usize {
        self.base.num_cols()
    }
    #[inline]
    fn num_cols(&self) -> usize {
        self.base.num_rows()
    }
    #[inline]
    fn entry(&self, row: usize, col: usize) -> i64 {
        self.base.entry(col, row)
    }
}

/// A view that applies a per-cell transform `(row, col, original) -> displayed`
/// over any [`Entries`] base.
///
/// Used to zero out an already-grown block ([`crate::bfs`] callers in the
/// wheel-minor search) or to force transition values in the nested-minor
/// extension's span-typing BFS (spec.md §4.4's masking table).
pub struct MaskedView<'a, E: Entries, F: Fn(usize, usize, i64) -> i64> {
    base: &'a E,
    modifier: F,
}

impl<'a, E: Entries, F: Fn(usize, usize, i64) -> i64> MaskedView<'a, E, F> {
    #[must_use]
    pub fn new(base: &'a E, modifier: F) -> Self {
        Self { base, modifier }
    }
}

impl<'a, E: Entries, F: Fn(usize, usize, i64) -> i64> Entries for MaskedView<'a, E, F> {
    #[inline]
    fn num_rows(&self) -> usize {
        self.base.num_rows()
    }
    #[inline]
    fn num_cols(&self) -> usize {
        self.base.num_cols()
    }
    #[inline]
    fn entry(&self, row: usize, col: usize) -> i64 {
        (self.modifier)(row, col, self.base.entry(row, col))
    }
}

/// A modifier that zeroes an upper-left `height x width` block and passes
/// everything else through unchanged.
#[must_use]
pub fn zero_block_modifier(height: usize, width: usize) -> impl Fn(usize, usize, i64) -> i64 {
    move |i, j, v| if i < height && j < width { 0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permuted_matrix_swap_is_logical_only() {
        let m = Matrix::from_row_major(2, 2, vec![1, 2, 3, 4]);
        let mut pm = PermutedMatrix::new(m);
        pm.swap_rows(0, 1);
        assert_eq!(pm.entry(0, 0), 3);
        assert_eq!(pm.entry(1, 0), 1);
    }

    #[test]
    fn pivot_flips_the_expected_quadrant() {
        // [[1,1,0],[1,1,1],[0,1,1]] pivot at (0,0):
        // rows with 1 in col 0 (other than 0): row 1
        // cols with 1 in row 0 (other than 0): col 1
        // flip (1,1): 1 -> 0
        let m = Matrix::from_row_major(3, 3, vec![1, 1, 0, 1, 1, 1, 0, 1, 1]);
        let mut pm = PermutedMatrix::new(m);
        pm.pivot(0, 0).unwrap();
        assert_eq!(pm.entry(1, 1), 0);
        assert_eq!(pm.entry(0, 0), 1);
        assert_eq!(pm.entry(2, 2), 1);
    }

    #[test]
    fn pivot_on_zero_entry_is_invariant_broken() {
        let m = Matrix::from_row_major(2, 2, vec![0, 1, 1, 1]);
        let mut pm = PermutedMatrix::new(m);
        assert!(pm.pivot(0, 0).is_err());
    }

    #[test]
    fn transposed_view_swaps_dims() {
        let m = Matrix::from_row_major(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let t = TransposedView::new(&m);
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t.entry(2, 1), m.entry(1, 2));
    }

    #[test]
    fn masked_view_zeroes_block() {
        let m = Matrix::from_row_major(3, 3, vec![1, 1, 1, 1, 1, 1, 1, 1, 1]);
        let masked = MaskedView::new(&m, zero_block_modifier(2, 2));
        assert_eq!(masked.entry(0, 0), 0);
        assert_eq!(masked.entry(1, 1), 0);
        assert_eq!(masked.entry(2, 2), 1);
        assert_eq!(masked.entry(0, 2), 1);
    }
}
