//! Matroid element labels, independent of any particular matrix.
//!
//! By convention row labels are negative (`-1, -2, ...`) and column labels
//! are positive (`+1, +2, ...`). Labels follow row/column swaps and binary
//! pivots; the multiset of labels is an invariant preserved by every matroid
//! operation (spec.md §3).

use crate::permutation::Permutation;

/// A signed element label: negative for rows, positive for columns.
pub type ElementLabel = i64;

/// Two arrays of element labels, permuted in lockstep with a
/// [`crate::matrix::PermutedMatrix`]'s row/column permutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatroidHandle {
    row_labels: Vec<ElementLabel>,
    col_labels: Vec<ElementLabel>,
    row_perm: Permutation,
    col_perm: Permutation,
}

impl MatroidHandle {
    /// Fresh handle for an `h x w` matrix: rows labeled `-1..=-h`, columns `1..=w`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let row_labels = (0..rows).map(|i| -((i + 1) as i64)).collect();
        let col_labels = (0..cols).map(|j| (j + 1) as i64).collect();
        Self {
            row_labels,
            col_labels,
            row_perm: Permutation::identity(rows),
            col_perm: Permutation::identity(cols),
        }
    }

    /// A handle over explicit row/column labels, identity-permuted. Used to
    /// build a transposed view of an existing handle (former columns become
    /// rows and vice versa) without inventing fresh labels, e.g. for a
    /// cographicness check that must report the original element labels.
    #[must_use]
    pub fn from_labels(row_labels: Vec<ElementLabel>, col_labels: Vec<ElementLabel>) -> Self {
        let row_perm = Permutation::identity(row_labels.len());
        let col_perm = Permutation::identity(col_labels.len());
        Self {
            row_labels,
            col_labels,
            row_perm,
            col_perm,
        }
    }

    #[inline]
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_perm.len()
    }

    #[inline]
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.col_perm.len()
    }

    /// The element label of logical row `i`.
    #[inline]
    #[must_use]
    pub fn row_label(&self, i: usize) -> ElementLabel {
        self.row_labels[self.row_perm.at(i)]
    }

    /// The element label of logical column `j`.
    #[inline]
    #[must_use]
    pub fn col_label(&self, j: usize) -> ElementLabel {
        self.col_labels[self.col_perm.at(j)]
    }

    #[inline]
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.row_perm.swap(i, j);
    }

    #[inline]
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.col_perm.swap(i, j);
    }

    /// Direct access to the row permutation, for callers that must keep this
    /// handle's ordering in lockstep with a [`crate::matrix::PermutedMatrix`]
    /// reordered by something other than `swap_rows` (e.g. a stable sort).
    #[inline]
    #[must_use]
    pub fn row_perm_mut(&mut self) -> &mut Permutation {
        &mut self.row_perm
    }

    /// Direct access to the column permutation; see [`Self::row_perm_mut`].
    #[inline]
    #[must_use]
    pub fn col_perm_mut(&mut self) -> &mut Permutation {
        &mut self.col_perm
    }

    /// Exchange the labels of logical row `i` and logical column `j`, as a
    /// binary pivot does: the pivot exchanges the corresponding basis/cobasis
    /// elements.
    pub fn swap_labels_on_pivot(&mut self, i: usize, j: usize) {
        let real_row = self.row_perm.at(i);
        let real_col = self.col_perm.at(j);
        std::mem::swap(&mut self.row_labels[real_row], &mut self.col_labels[real_col]);
    }

    /// All row labels in logical order.
    #[must_use]
    pub fn row_labels(&self) -> Vec<ElementLabel> {
        (0..self.num_rows()).map(|i| self.row_label(i)).collect()
    }

    /// All column labels in logical order.
    #[must_use]
    pub fn col_labels(&self) -> Vec<ElementLabel> {
        (0..self.num_cols()).map(|j| self.col_label(j)).collect()
    }

    /// The full label multiset (rows then columns, logical order).
    #[must_use]
    pub fn all_labels(&self) -> Vec<ElementLabel> {
        let mut v = self.row_labels();
        v.extend(self.col_labels());
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn fresh_handle_has_negative_row_and_positive_col_labels() {
        let h = MatroidHandle::new(2, 3);
        assert_eq!(h.row_labels(), vec![-1, -2]);
        assert_eq!(h.col_labels(), vec![1, 2, 3]);
    }

    #[test]
    fn swap_preserves_label_multiset() {
        let mut h = MatroidHandle::new(3, 3);
        let before: BTreeSet<_> = h.all_labels().into_iter().collect();
        h.swap_rows(0, 2);
        h.swap_cols(1, 2);
        h.swap_labels_on_pivot(0, 0);
        let after: BTreeSet<_> = h.all_labels().into_iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn pivot_label_swap_exchanges_basis_cobasis_elements() {
        let mut h = MatroidHandle::new(2, 2);
        let row0 = h.row_label(0);
        let col0 = h.col_label(0);
        h.swap_labels_on_pivot(0, 0);
        assert_eq!(h.row_label(0), col0);
        assert_eq!(h.col_label(0), row0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // spec.md §3: the label multiset is invariant under any sequence of row
    // swaps, column swaps, and pivot label exchanges.
    proptest! {
        #[test]
        fn any_swap_sequence_preserves_label_multiset(
            ops in proptest::collection::vec(0u8..3, 0..20),
        ) {
            let rows = 5;
            let cols = 5;
            let mut h = MatroidHandle::new(rows, cols);
            let before: BTreeSet<_> = h.all_labels().into_iter().collect();

            for (idx, op) in ops.into_iter().enumerate() {
                match op {
                    0 => h.swap_rows(idx % rows, (idx + 1) % rows),
                    1 => h.swap_cols(idx % cols, (idx + 1) % cols),
                    _ => h.swap_labels_on_pivot(idx % rows, idx % cols),
                }
            }

            let after: BTreeSet<_> = h.all_labels().into_iter().collect();
            prop_assert_eq!(before, after);
        }
    }
}
