// crates/tu-signing/src/lib.rs

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Signing check and repair (spec.md §4.1), a.k.a. Camion's signing.
//!
//! A `{-1,0,+1}` matrix `S` is *signed* iff it equals in absolute value a
//! matrix `S̃` whose support matroid it correctly signs: walking any cycle in
//! the bipartite graph of nonzero entries, the alternating sum of entries
//! along the cycle is `0 mod 4`. Two entry points:
//!
//! - [`test`] / [`is_signed`]: test mode; on failure, returns one violating
//!   submatrix in the original coordinate system.
//! - [`sign_in_place`]: repair mode; flips entries until signed, reporting
//!   whether any change was made.
//!
//! Ported from `signing.cpp`'s `sign_matrix`/`check_sign`: process columns
//! left to right over a growing "already consistent" block, BFS from one
//! member of each new column's nonzero rows to every other, and sum matrix
//! entries along the BFS path (including both endpoints in the new column).
//! The alternating sum, reduced mod 4 in absolute value, must be 0 or 2;
//! anything else is a [`tu_core::CoreError::InvariantBroken`] (the BFS
//! promised reachability that didn't hold, or an implementation bug). 2 means
//! "flip the sign at the far endpoint" (repair) or "here's your violator"
//! (test).
//!
//! Running time: `O(height * width^2)`.

use std::collections::{BTreeSet, HashMap};

use tu_core::{
    bipartite_bfs, BfsNode, BipartiteDims, CoreError, CoreResult, Entries, Matrix, PermutedMatrix,
    SubmatrixIndices,
};

/// Outcome of a signing test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningOutcome {
    /// The matrix is already signed.
    Signed,
    /// The matrix is not signed; here is a violating submatrix (original coordinates).
    NotSigned(SubmatrixIndices),
}

/// Test whether `matrix` is a signed version of its support.
///
/// # Errors
/// See [`test`].
pub fn is_signed(matrix: &Matrix) -> CoreResult<bool> {
    Ok(matches!(test(matrix)?, SigningOutcome::Signed))
}

/// Test whether `matrix` is signed; on failure, return the violating submatrix.
///
/// # Errors
/// Returns [`CoreError::InvariantBroken`] if the BFS driving the check fails
/// to reach a node it was promised to reach, or if a path sum lands outside
/// `{0, 2} mod 4` — both indicate an implementation bug, not a property of
/// the input.
pub fn test(matrix: &Matrix) -> CoreResult<SigningOutcome> {
    let transpose = matrix.cols() > matrix.rows();
    let working = if transpose {
        transpose_owned(matrix)
    } else {
        matrix.clone()
    };

    let result = sign_pass(&working, false)?;
    match result.violator {
        None => Ok(SigningOutcome::Signed),
        Some(sub) => {
            let sub = if transpose {
                SubmatrixIndices {
                    rows: sub.columns,
                    columns: sub.rows,
                }
            } else {
                sub
            };
            Ok(SigningOutcome::NotSigned(sub))
        }
    }
}

/// Repair `matrix` in place by flipping signs until it is a signed version
/// of its support. Returns whether any entry changed.
///
/// # Errors
/// See [`test`].
pub fn sign_in_place(matrix: &mut Matrix) -> CoreResult<bool> {
    let transpose = matrix.cols() > matrix.rows();
    let working = if transpose {
        transpose_owned(matrix)
    } else {
        matrix.clone()
    };

    let result = sign_pass(&working, true)?;
    let repaired = result.output.expect("repair mode always produces an output");
    *matrix = if transpose {
        transpose_owned(&repaired)
    } else {
        repaired
    };
    Ok(result.changed)
}

/// Replace every nonzero entry of `matrix` with `1`, in place.
pub fn support_matrix(matrix: &mut Matrix) {
    matrix.take_support_mut();
}

struct SignPassResult {
    /// Set only in test mode, when the matrix is not signed.
    violator: Option<SubmatrixIndices>,
    /// Set only in repair mode: whether any entry was flipped.
    changed: bool,
    /// Set only in repair mode: the fully processed (signed) matrix, in
    /// `matrix`'s own coordinate system.
    output: Option<Matrix>,
}

/// Core signing pass, mirroring `sign_matrix` in `signing.cpp`. Assumes
/// `matrix.rows() >= matrix.cols()` (callers transpose beforehand otherwise).
fn sign_pass(matrix: &Matrix, repair: bool) -> CoreResult<SignPassResult> {
    let mut permuted = PermutedMatrix::new(matrix.clone());
    let mut handled_rows = 0usize;
    let rows = permuted.num_rows();
    let cols = permuted.num_cols();
    let mut changed = false;

    for handled_cols in 0..cols {
        if let Some(found_col) = find_nonzero_column(&permuted, handled_cols, cols, 0, handled_rows)
        {
            if found_col != handled_cols {
                permuted.swap_cols(handled_cols, found_col);
            }

            let dims = BipartiteDims::new(handled_rows, handled_cols);
            let mut start_nodes = Vec::new();
            let mut end_nodes = Vec::new();
            let mut all_nodes: BTreeSet<usize> = BTreeSet::new();
            for row in 0..handled_rows {
                if permuted.entry(row, handled_cols) != 0 {
                    let idx = dims.row_to_index(row);
                    if start_nodes.is_empty() {
                        start_nodes.push(idx);
                    } else {
                        end_nodes.push(idx);
                    }
                    all_nodes.insert(idx);
                }
            }

            if !start_nodes.is_empty() && !end_nodes.is_empty() {
                let (bfs, reached_all) =
                    bipartite_bfs(&permuted, dims, &start_nodes, &end_nodes, true);
                if !reached_all {
                    return Err(CoreError::InvariantBroken(
                        "signing: BFS did not reach all nodes over the handled block",
                    ));
                }

                let mut changes: HashMap<usize, bool> = HashMap::new();
                for &end in &end_nodes {
                    check_sign(&permuted, &bfs, dims, &all_nodes, end, handled_cols, &mut changes)?;
                }

                let flips: Vec<(usize, bool)> = changes.iter().map(|(&k, &v)| (k, v)).collect();
                for (row_idx, flip) in flips {
                    if !flip {
                        continue;
                    }
                    if !repair {
                        let sub = build_violator(&permuted, &bfs, dims, &all_nodes, row_idx, handled_cols);
                        return Ok(SignPassResult {
                            violator: Some(sub),
                            changed: false,
                            output: None,
                        });
                    }
                    let current = permuted.entry(dims.index_to_row(row_idx), handled_cols);
                    permuted.set(dims.index_to_row(row_idx), handled_cols, -current);
                    changed = true;
                }
            }

            reorder_and_extend(&mut permuted, &mut handled_rows, handled_cols);
        } else {
            // Handled upper-left and the rest are disconnected through this
            // column; advance `handled_rows` past the next nonzero column, if any.
            let mut advance_at = None;
            for col in handled_cols..cols {
                if (handled_rows..rows).any(|r| permuted.entry(r, col) != 0) {
                    advance_at = Some(col);
                    break;
                }
            }
            if let Some(col) = advance_at {
                reorder_and_extend(&mut permuted, &mut handled_rows, col);
            }
        }
    }

    if repair {
        Ok(SignPassResult {
            violator: None,
            changed,
            output: Some(permuted.into_base()),
        })
    } else {
        Ok(SignPassResult {
            violator: None,
            changed: false,
            output: None,
        })
    }
}

/// Find a nonzero entry in columns `[col_first, col_beyond)` restricted to
/// rows `[row_first, row_beyond)`; return the column it was found in (the
/// caller swaps it to `col_first`), mirroring `find_nonzero_column`.
fn find_nonzero_column(
    matrix: &PermutedMatrix,
    col_first: usize,
    col_beyond: usize,
    row_first: usize,
    row_beyond: usize,
) -> Option<usize> {
    for col in col_first..col_beyond {
        for row in row_first..row_beyond {
            if matrix.entry(row, col) != 0 {
                return Some(col);
            }
        }
    }
    None
}

/// Walk the BFS path from `row_idx` back to the handled block, collecting
/// the row/column real indices it touches, and add the new column.
fn build_violator(
    matrix: &PermutedMatrix,
    bfs: &[BfsNode],
    dims: BipartiteDims,
    all_nodes: &BTreeSet<usize>,
    row_idx: usize,
    handled_cols: usize,
) -> SubmatrixIndices {
    let mut violator_rows: BTreeSet<usize> = BTreeSet::new();
    let mut violator_cols: BTreeSet<usize> = BTreeSet::new();
    let mut index = row_idx;
    loop {
        if dims.is_row(index) {
            violator_rows.insert(matrix.real_row(dims.index_to_row(index)));
        } else {
            violator_cols.insert(matrix.real_col(dims.index_to_column(index)));
        }
        if all_nodes.contains(&index) {
            break;
        }
        index = bfs[index].predecessor;
    }
    violator_rows.insert(matrix.real_row(dims.index_to_row(index)));
    violator_cols.insert(matrix.real_col(handled_cols));
    SubmatrixIndices {
        rows: violator_rows.into_iter().collect(),
        columns: violator_cols.into_iter().collect(),
    }
}

/// After processing column `handled_cols`, reorder the unhandled row block
/// so rows with a nonzero in that column come first (stably), then extend
/// `handled_rows` past the resulting contiguous nonzero prefix.
fn reorder_and_extend(matrix: &mut PermutedMatrix, handled_rows: &mut usize, handled_cols: usize) {
    let rows = matrix.num_rows();
    let real_col = matrix.real_col(handled_cols);
    let is_zero_at: HashMap<usize, bool> = (*handled_rows..rows)
        .map(|r| {
            let real_row = matrix.real_row(r);
            (real_row, matrix.base().get(real_row, real_col) == 0)
        })
        .collect();
    matrix
        .row_perm_mut()
        .stable_sort_range_by_key(*handled_rows, rows, |real_row| is_zero_at[&real_row]);

    while *handled_rows < rows && matrix.entry(*handled_rows, handled_cols) != 0 {
        *handled_rows += 1;
    }
}

/// Recursive alternating-sum check along the BFS tree, mirroring `check_sign`.
#[allow(clippy::too_many_arguments)]
fn check_sign(
    matrix: &PermutedMatrix,
    bfs: &[BfsNode],
    dims: BipartiteDims,
    nodes: &BTreeSet<usize>,
    current_index: usize,
    column: usize,
    changes: &mut HashMap<usize, bool>,
) -> CoreResult<()> {
    if bfs[current_index].predecessor == current_index {
        changes.insert(dims.index_to_row(current_index), false);
        return Ok(());
    }

    let mut value = matrix.entry(dims.index_to_row(current_index), column);
    let mut index = current_index;
    let mut last;
    loop {
        last = index;
        index = bfs[index].predecessor;
        let (r, c) = dims.indexes_to_coordinates(index, last);
        value += matrix.entry(r, c);
        if nodes.contains(&index) {
            break;
        }
    }

    if !changes.contains_key(&dims.index_to_row(index)) {
        check_sign(matrix, bfs, dims, nodes, index, column, changes)?;
    }

    value += matrix.entry(dims.index_to_row(index), column);
    if *changes.get(&dims.index_to_row(index)).unwrap_or(&false) {
        value += 2;
    }

    let reduced = value.unsigned_abs() % 4;
    changes.insert(dims.index_to_row(current_index), reduced == 2);

    if reduced != 0 && reduced != 2 {
        return Err(CoreError::InvariantBroken(
            "signing: modulo-sum of cycle was neither 0 nor 2",
        ));
    }
    Ok(())
}

fn transpose_owned(matrix: &Matrix) -> Matrix {
    let mut out = Matrix::zeros(matrix.cols(), matrix.rows());
    for i in 0..matrix.rows() {
        for j in 0..matrix.cols() {
            out.set(j, i, matrix.get(i, j));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_plus_wheel_is_signed() {
        // spec.md §8 scenario 1 (W3), signed correctly.
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
            1, 1, 0,
            1, 1, 1,
            0, 1, 1,
        ]);
        assert!(is_signed(&m).unwrap());
    }

    #[test]
    fn mis_signed_three_cycle_is_not_signed() {
        // spec.md §8 scenario 4: cycle matrix of a 3-cycle with wrong signs.
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
             1, 1, 0,
             1, 0, 1,
             0, 1, 1,
        ]);
        let outcome = test(&m).unwrap();
        match outcome {
            SigningOutcome::NotSigned(sub) => {
                assert_eq!(sub.size(), 3);
            }
            SigningOutcome::Signed => panic!("expected a violator"),
        }
    }

    #[test]
    fn repair_is_involutive() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
             1, 1, 0,
             1, 0, 1,
             0, 1, 1,
        ]);
        let mut once = m.clone();
        sign_in_place(&mut once).unwrap();
        assert!(is_signed(&once).unwrap());

        let mut twice = once.clone();
        let changed_again = sign_in_place(&mut twice).unwrap();
        assert!(!changed_again);
        assert_eq!(once, twice);
    }

    #[test]
    fn already_signed_matrix_is_unchanged_by_repair() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
            1, 1, 0,
            1, 1, 1,
            0, 1, 1,
        ]);
        let mut repaired = m.clone();
        let changed = sign_in_place(&mut repaired).unwrap();
        assert!(!changed);
        assert_eq!(m, repaired);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn small_signed_support_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
        proptest::collection::vec(prop_oneof![Just(0i64), Just(1i64)], rows * cols)
            .prop_map(move |data| Matrix::from_row_major(rows, cols, data))
    }

    proptest! {
        // spec.md §8: repairing a signed matrix is idempotent (a second
        // `sign_in_place` pass changes nothing and its output is already signed).
        #[test]
        fn repair_is_idempotent(mut m in small_signed_support_matrix(4, 4)) {
            sign_in_place(&mut m).unwrap();
            prop_assert!(is_signed(&m).unwrap());
            let mut twice = m.clone();
            let changed_again = sign_in_place(&mut twice).unwrap();
            prop_assert!(!changed_again);
            prop_assert_eq!(m, twice);
        }

        // Repair never changes the support, only the signs: `take_support_mut`
        // applied to the repaired matrix must equal the support of the input.
        #[test]
        fn repair_preserves_support(m in small_signed_support_matrix(4, 4)) {
            let mut expected_support = m.clone();
            expected_support.take_support_mut();

            let mut repaired = m;
            sign_in_place(&mut repaired).unwrap();
            repaired.take_support_mut();
            prop_assert_eq!(repaired, expected_support);
        }
    }
}
