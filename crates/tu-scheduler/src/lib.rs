// crates/tu-scheduler/src/lib.rs

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! The recursive k-sum decomposition driver (spec.md §4.8) and violator
//! search (spec.md §4.9): the top-level entry point that ties signing,
//! wheel-minor search, nested-minor extension, the graphicness/cographicness
//! builders, the R10 test, and 3-separation enumeration into one decision.

use std::collections::BTreeSet;
use std::ops::Range;

use tu_core::{
    CertificateGraph, CoreError, CoreResult, DecompositionTree, ElementLabel, ExtensionTag,
    LabeledEdge, Matrix, MatroidHandle, NestedMinorSequence, PermutedMatrix, Separation,
    SeparationKind, SubmatrixIndices,
};
use tu_graphic::{build_graphic_certificate, test_r10, R10Outcome};
use tu_minors::{extend_minor, find_wheel_minor, MinorOutcome, Workspace};
use tu_signing::{is_signed, sign_in_place, support_matrix};

/// The outcome of a full totally-unimodular decision.
#[derive(Debug)]
pub struct TuDecision {
    /// Whether the input matrix is totally unimodular.
    pub is_regular: bool,
    /// The decomposition certificate, if one was requested.
    pub tree: Option<DecompositionTree>,
    /// A witnessing square non-TU submatrix (original coordinates), if `is_regular` is false.
    pub violator: Option<SubmatrixIndices>,
}

/// Decide whether `input` is totally unimodular, optionally keeping the full
/// decomposition certificate around.
///
/// An entry outside `{-1,0,+1}` is not a pipeline failure (spec.md §7/§8): it
/// makes the matrix trivially non-TU, witnessed by that single entry as a
/// 1x1 violator, and is reported through the ordinary `Ok` path rather than
/// as an error.
///
/// # Errors
/// Propagates [`tu_core::CoreError`] from signing or an invariant violation
/// anywhere in the pipeline.
pub fn decide_tu(input: &Matrix, build_tree: bool) -> CoreResult<TuDecision> {
    if let Some((row, col)) = first_domain_violation(input) {
        let _ = build_tree;
        return Ok(TuDecision {
            is_regular: false,
            tree: None,
            violator: Some(SubmatrixIndices { rows: vec![row], columns: vec![col] }),
        });
    }

    let mut working = input.clone();
    if !is_signed(&working)? {
        sign_in_place(&mut working)?;
    }
    support_matrix(&mut working);

    let matroid = MatroidHandle::new(working.rows(), working.cols());
    let extra = BTreeSet::new();
    let (is_regular, tree) = decompose(working, matroid, extra)?;

    let violator = if is_regular { None } else { tree.as_ref().and_then(|t| search_violator(input, t).ok()) };

    Ok(TuDecision { is_regular, tree: if build_tree { tree } else { None }, violator })
}

fn first_domain_violation(matrix: &Matrix) -> Option<(usize, usize)> {
    for row in 0..matrix.rows() {
        for col in 0..matrix.cols() {
            if !(-1..=1).contains(&matrix.get(row, col)) {
                return Some((row, col));
            }
        }
    }
    None
}

/// Recursively decompose a support matrix/matroid pair (spec.md §4.8). The
/// certificate is always built; callers that didn't ask for it (and won't
/// need a violator) simply drop it.
fn decompose(
    matrix: Matrix,
    matroid: MatroidHandle,
    mut extra: BTreeSet<ElementLabel>,
) -> CoreResult<(bool, Option<DecompositionTree>)> {
    let rows = matrix.rows();
    let cols = matrix.cols();

    if rows.min(cols) <= 2 {
        let (graph, cograph) = build_small_certificate(&matrix, &matroid);
        return Ok((true, Some(leaf(graph, cograph, false, &matroid, &extra))));
    }

    let mut pm = PermutedMatrix::new(matrix);
    let mut mh = matroid;

    let wheel_outcome = {
        let mut ws = Workspace::new(&mut pm, &mut mh);
        find_wheel_minor(&mut ws, &mut extra)?
    };
    if let MinorOutcome::Separation(sep) = wheel_outcome {
        return split_and_recurse(pm, mh, sep, extra);
    }

    let mut sequence = NestedMinorSequence::new();
    let (mut h, mut w) = (3usize, 3usize);
    loop {
        let outcome = {
            let mut ws = Workspace::new(&mut pm, &mut mh);
            extend_minor(&mut ws, h, w, &mut sequence)?
        };
        match outcome {
            MinorOutcome::Extended(tag) => {
                let (dr, dc) = tag.delta();
                h += dr;
                w += dc;
            }
            MinorOutcome::Separation(sep) => return split_and_recurse(pm, mh, sep, extra),
            MinorOutcome::Saturated => break,
            MinorOutcome::Wheel => unreachable!("extend_minor never reports a fresh wheel"),
        }
    }

    let graph = build_graphic_certificate(&mh, &pm, &sequence);
    let (t_matrix, t_matroid, t_sequence) = transpose_for_cograph(&pm, &mh, &sequence);
    let cograph = build_graphic_certificate(&t_matroid, &t_matrix, &t_sequence);

    if graph.is_some() || cograph.is_some() {
        return Ok((true, Some(leaf(graph, cograph, false, &mh, &extra))));
    }

    if rows == 5 && cols == 5 && test_r10(&pm) == R10Outcome::IsR10 {
        return Ok((true, Some(leaf(None, None, true, &mh, &extra))));
    }

    let three_sep = {
        let mut ws = Workspace::new(&mut pm, &mut mh);
        tu_separation::find_3_separation(&mut ws, &sequence)?
    };
    match three_sep {
        Some(sep) => split_and_recurse(pm, mh, sep, extra),
        None => Ok((false, Some(leaf(None, None, false, &mh, &extra)))),
    }
}

fn leaf(
    graph: Option<CertificateGraph>,
    cograph: Option<CertificateGraph>,
    is_r10: bool,
    matroid: &MatroidHandle,
    extra: &BTreeSet<ElementLabel>,
) -> DecompositionTree {
    DecompositionTree::Leaf {
        graph,
        cograph,
        is_r10,
        labels: matroid.all_labels(),
        extra_labels: extra.iter().copied().collect(),
    }
}

/// Build a transposed matrix/matroid/sequence so the graphicness builder
/// can certify cographicness by running unmodified against the dual.
fn transpose_for_cograph(
    pm: &PermutedMatrix,
    mh: &MatroidHandle,
    sequence: &NestedMinorSequence,
) -> (PermutedMatrix, MatroidHandle, NestedMinorSequence) {
    let t = transpose_owned(&pm.materialize());
    let t_mh = MatroidHandle::from_labels(mh.col_labels(), mh.row_labels());
    let mut t_sequence = NestedMinorSequence::new();
    for &tag in sequence.tags() {
        t_sequence.push(transpose_tag(tag));
    }
    (PermutedMatrix::new(t), t_mh, t_sequence)
}

/// `OneRow`/`OneColumn` swap roles under transposition; `OneRowOneColumn` is
/// self-dual; the two asymmetric elaborate tags swap.
fn transpose_tag(tag: ExtensionTag) -> ExtensionTag {
    match tag {
        ExtensionTag::OneRow => ExtensionTag::OneColumn,
        ExtensionTag::OneColumn => ExtensionTag::OneRow,
        ExtensionTag::OneRowOneColumn => ExtensionTag::OneRowOneColumn,
        ExtensionTag::TwoRowsOneColumn => ExtensionTag::OneRowTwoColumns,
        ExtensionTag::OneRowTwoColumns => ExtensionTag::TwoRowsOneColumn,
    }
}

fn transpose_owned(m: &Matrix) -> Matrix {
    let mut t = Matrix::zeros(m.cols(), m.rows());
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            t.set(j, i, m.get(i, j));
        }
    }
    t
}

/// Specialized builder for the `min(rows, cols) <= 2` base case (spec.md
/// §4.8): a rank-<=2 binary matroid is always graphic. Rows become a path
/// of tree edges; each column becomes a loop (empty support), a parallel
/// edge (single-row support), or a chord spanning the whole path (both-rows
/// support) — the only three possibilities when there are at most 2 rows.
/// When it's columns (not rows) that are `<= 2`, the same construction runs
/// on the transpose and the result is reported as the cograph instead.
fn build_small_certificate(matrix: &Matrix, matroid: &MatroidHandle) -> (Option<CertificateGraph>, Option<CertificateGraph>) {
    if matrix.rows() <= 2 {
        let graph = path_chord_graph(matrix, |i| matroid.row_label(i), |j| matroid.col_label(j));
        (Some(graph), None)
    } else {
        let t = transpose_owned(matrix);
        let graph = path_chord_graph(&t, |i| matroid.col_label(i), |j| matroid.row_label(j));
        (None, Some(graph))
    }
}

fn path_chord_graph(m: &Matrix, tree_label: impl Fn(usize) -> ElementLabel, chord_label: impl Fn(usize) -> ElementLabel) -> CertificateGraph {
    let tree_len = m.rows();
    let chord_count = m.cols();
    let mut edges = Vec::with_capacity(tree_len + chord_count);
    for r in 0..tree_len {
        edges.push(LabeledEdge { u: r, v: r + 1, label: tree_label(r) });
    }
    for c in 0..chord_count {
        let support: Vec<usize> = (0..tree_len).filter(|&r| m.get(r, c) != 0).collect();
        let (u, v) = match support.len() {
            0 => (0, 0),
            1 => (support[0], support[0] + 1),
            _ => (0, tree_len),
        };
        edges.push(LabeledEdge { u, v, label: chord_label(c) });
    }
    CertificateGraph { num_vertices: tree_len + 1, edges }
}

type LabelPair = (Vec<ElementLabel>, Vec<ElementLabel>);

/// Split at a found separation and recurse independently on both sides
/// (spec.md §4.8/§3's k-sum shape). Extra labels propagate unchanged for
/// `k >= 2`; for a 1-separation they are filtered to each child's own label
/// set. `sep.special_swap` (the elaborate-extension re-embedding hint) is not
/// consulted here: the split reads directly off the matrix's current
/// permuted layout, which already reflects whatever reordering produced the
/// separation — see DESIGN.md.
fn split_and_recurse(pm: PermutedMatrix, mh: MatroidHandle, sep: Separation, extra: BTreeSet<ElementLabel>) -> CoreResult<(bool, Option<DecompositionTree>)> {
    let full = pm.materialize();
    let row_labels = mh.row_labels();
    let col_labels = mh.col_labels();
    let (h1, w1) = sep.split;
    let rows = full.rows();
    let cols = full.cols();

    let (left_matrix, left_labels, right_matrix, right_labels, kind) = match sep.rank {
        0 => {
            let left_m = submatrix(&full, 0..h1, 0..w1);
            let right_m = submatrix(&full, h1..rows, w1..cols);
            (
                left_m,
                (row_labels[..h1].to_vec(), col_labels[..w1].to_vec()),
                right_m,
                (row_labels[h1..].to_vec(), col_labels[w1..].to_vec()),
                SeparationKind::OneSum,
            )
        }
        1 => two_sum_split(&full, &row_labels, &col_labels, &sep),
        _ => three_sum_split(&full, &row_labels, &col_labels, &sep),
    };

    let (left_extra, right_extra) = if sep.rank == 0 {
        (filtered_extra(&extra, &left_labels), filtered_extra(&extra, &right_labels))
    } else {
        (extra.clone(), extra)
    };

    let left_mh = MatroidHandle::from_labels(left_labels.0.clone(), left_labels.1.clone());
    let right_mh = MatroidHandle::from_labels(right_labels.0.clone(), right_labels.1.clone());

    let (left_regular, left_tree) = decompose(left_matrix, left_mh, left_extra)?;
    let (right_regular, right_tree) = decompose(right_matrix, right_mh, right_extra)?;

    let is_regular = left_regular && right_regular;
    let mut labels = row_labels;
    labels.extend(col_labels);
    let tree = DecompositionTree::Internal {
        left: Box::new(left_tree.expect("decompose always returns a tree")),
        right: Box::new(right_tree.expect("decompose always returns a tree")),
        kind,
        labels,
        extra_labels: Vec::new(),
    };
    Ok((is_regular, Some(tree)))
}

fn filtered_extra(extra: &BTreeSet<ElementLabel>, labels: &LabelPair) -> BTreeSet<ElementLabel> {
    let present: BTreeSet<ElementLabel> = labels.0.iter().chain(labels.1.iter()).copied().collect();
    extra.iter().copied().filter(|l| present.contains(l)).collect()
}

/// Exact 2-sum split (Seymour's matrix construction): the rank-1
/// off-diagonal block has a single witness position `(wr, wc)`. Whichever
/// side of the split the witness's row falls on contributes the *actual*
/// connecting row or column
/// — copied entry-for-entry from the full matrix, not an indicator pattern —
/// to the other side, carrying over the witness's own original element
/// label. This is what makes `TU(parent) <=> TU(left) && TU(right)` hold: the
/// join reproduces the real rank-1 outer product, not an approximation of it.
fn two_sum_split(full: &Matrix, row_labels: &[ElementLabel], col_labels: &[ElementLabel], sep: &Separation) -> (Matrix, LabelPair, Matrix, LabelPair, SeparationKind) {
    let (h1, w1) = sep.split;
    let (wr, wc) = sep.witnesses[0];
    let rows = full.rows();
    let cols = full.cols();

    if wr >= h1 {
        // Witness lies in the lower-left block: its row becomes a real
        // extra row of the upper-left piece, its column a real extra
        // column of the lower-right piece.
        let marker_row: Vec<i64> = (0..w1).map(|j| full.get(wr, j)).collect();
        let left = append_row(&submatrix(full, 0..h1, 0..w1), &marker_row);
        let left_labels = (append(&row_labels[..h1], row_labels[wr]), col_labels[..w1].to_vec());

        let marker_col: Vec<i64> = (h1..rows).map(|i| full.get(i, wc)).collect();
        let right = prepend_col(&submatrix(full, h1..rows, w1..cols), &marker_col);
        let right_labels = (row_labels[h1..].to_vec(), prepend(&col_labels[w1..], col_labels[wc]));

        (left, left_labels, right, right_labels, SeparationKind::TwoSum)
    } else {
        // Witness lies in the upper-right block: its column becomes a real
        // extra column of the upper-left piece, its row a real extra row
        // of the lower-right piece.
        let marker_col: Vec<i64> = (0..h1).map(|i| full.get(i, wc)).collect();
        let left = append_col(&submatrix(full, 0..h1, 0..w1), &marker_col);
        let left_labels = (row_labels[..h1].to_vec(), append(&col_labels[..w1], col_labels[wc]));

        let marker_row: Vec<i64> = (w1..cols).map(|j| full.get(wr, j)).collect();
        let right = prepend_row(&submatrix(full, h1..rows, w1..cols), &marker_row);
        let right_labels = (prepend(&row_labels[h1..], row_labels[wr]), col_labels[w1..].to_vec());

        (left, left_labels, right, right_labels, SeparationKind::TwoSum)
    }
}

/// Exact 3-sum split. A 3-separation's rank-2 off-diagonal pair has one
/// witness in each corner (upper-right and lower-left); after
/// `find_3_separation`'s normalization both corners carry rank exactly 1.
/// Each side of the split gets the *other* corner's witness row and column,
/// copied entry-for-entry (including the shared corner cell), carrying the
/// witnesses' own original labels — the two-witness generalization of
/// [`two_sum_split`]'s single-witness join to Seymour's rank-2 case.
fn three_sum_split(full: &Matrix, row_labels: &[ElementLabel], col_labels: &[ElementLabel], sep: &Separation) -> (Matrix, LabelPair, Matrix, LabelPair, SeparationKind) {
    let (h1, w1) = sep.split;
    let rows = full.rows();
    let cols = full.cols();

    let mut witness_ur = None;
    let mut witness_ll = None;
    for &(r, c) in &sep.witnesses {
        if r < h1 && c >= w1 {
            witness_ur = Some((r, c));
        } else if r >= h1 && c < w1 {
            witness_ll = Some((r, c));
        }
    }
    let (r_ur, c_ur) = witness_ur.expect("a 3-separation always has an upper-right witness");
    let (r_ll, c_ll) = witness_ll.expect("a 3-separation always has a lower-left witness");

    let left_row: Vec<i64> = (0..w1).map(|j| full.get(r_ll, j)).collect();
    let left_base = append_row(&submatrix(full, 0..h1, 0..w1), &left_row);
    let mut left_col: Vec<i64> = (0..h1).map(|i| full.get(i, c_ur)).collect();
    left_col.push(full.get(r_ll, c_ur));
    let left = append_col(&left_base, &left_col);
    let left_labels = (append(&row_labels[..h1], row_labels[r_ll]), append(&col_labels[..w1], col_labels[c_ur]));

    let right_row: Vec<i64> = (w1..cols).map(|j| full.get(r_ur, j)).collect();
    let right_base = prepend_row(&submatrix(full, h1..rows, w1..cols), &right_row);
    let mut right_col: Vec<i64> = vec![full.get(r_ur, c_ll)];
    right_col.extend((h1..rows).map(|i| full.get(i, c_ll)));
    let right = prepend_col(&right_base, &right_col);
    let right_labels = (prepend(&row_labels[h1..], row_labels[r_ur]), prepend(&col_labels[w1..], col_labels[c_ll]));

    (left, left_labels, right, right_labels, SeparationKind::ThreeSum)
}

fn append(labels: &[ElementLabel], extra: ElementLabel) -> Vec<ElementLabel> {
    let mut v = labels.to_vec();
    v.push(extra);
    v
}

fn prepend(labels: &[ElementLabel], extra: ElementLabel) -> Vec<ElementLabel> {
    let mut v = Vec::with_capacity(labels.len() + 1);
    v.push(extra);
    v.extend_from_slice(labels);
    v
}

fn append_row(m: &Matrix, pattern: &[i64]) -> Matrix {
    let mut out = Matrix::zeros(m.rows() + 1, m.cols());
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            out.set(i, j, m.get(i, j));
        }
    }
    for (j, &v) in pattern.iter().enumerate() {
        out.set(m.rows(), j, v);
    }
    out
}

fn append_col(m: &Matrix, pattern: &[i64]) -> Matrix {
    let mut out = Matrix::zeros(m.rows(), m.cols() + 1);
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            out.set(i, j, m.get(i, j));
        }
    }
    for (i, &v) in pattern.iter().enumerate() {
        out.set(i, m.cols(), v);
    }
    out
}

fn prepend_row(m: &Matrix, pattern: &[i64]) -> Matrix {
    let mut out = Matrix::zeros(m.rows() + 1, m.cols());
    for (j, &v) in pattern.iter().enumerate() {
        out.set(0, j, v);
    }
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            out.set(i + 1, j, m.get(i, j));
        }
    }
    out
}

fn prepend_col(m: &Matrix, pattern: &[i64]) -> Matrix {
    let mut out = Matrix::zeros(m.rows(), m.cols() + 1);
    for (i, &v) in pattern.iter().enumerate() {
        out.set(i, 0, v);
    }
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            out.set(i, j + 1, m.get(i, j));
        }
    }
    out
}

fn submatrix(m: &Matrix, rows: Range<usize>, cols: Range<usize>) -> Matrix {
    let rs: Vec<usize> = rows.collect();
    let cs: Vec<usize> = cols.collect();
    let mut out = Matrix::zeros(rs.len(), cs.len());
    for (oi, &i) in rs.iter().enumerate() {
        for (oj, &j) in cs.iter().enumerate() {
            out.set(oi, oj, m.get(i, j));
        }
    }
    out
}

/// Violator search (spec.md §4.9): starting from the smallest irregular
/// leaf's label set, greedily drop one element at a time as long as the
/// reduced submatrix is still non-TU. Every label in a leaf's set is a real
/// element of the original matrix (a k-sum split's connecting row/column
/// carries over its witness's own original label — see [`two_sum_split`]),
/// so no filtering is needed before mapping labels back to coordinates.
fn search_violator(original: &Matrix, tree: &DecompositionTree) -> CoreResult<SubmatrixIndices> {
    let labels = smallest_irregular_leaf_labels(tree).ok_or(CoreError::InvariantBroken("non-TU decision has no irregular leaf"))?;

    let mut rows: Vec<usize> = labels.iter().filter(|l| **l < 0).map(|&l| (-l - 1) as usize).collect();
    let mut cols: Vec<usize> = labels.iter().filter(|l| **l > 0).map(|&l| (l - 1) as usize).collect();
    rows.sort_unstable();
    cols.sort_unstable();

    loop {
        let mut reduced = false;

        if rows.len() > 1 {
            for i in 0..rows.len() {
                let mut trial = rows.clone();
                trial.remove(i);
                if !decide_tu(&gather(original, &trial, &cols), false)?.is_regular {
                    rows = trial;
                    reduced = true;
                    break;
                }
            }
        }
        if !reduced && cols.len() > 1 {
            for j in 0..cols.len() {
                let mut trial = cols.clone();
                trial.remove(j);
                if !decide_tu(&gather(original, &rows, &trial), false)?.is_regular {
                    cols = trial;
                    reduced = true;
                    break;
                }
            }
        }
        if !reduced {
            break;
        }
    }

    Ok(SubmatrixIndices { rows, columns: cols })
}

fn smallest_irregular_leaf_labels(tree: &DecompositionTree) -> Option<Vec<ElementLabel>> {
    match tree {
        DecompositionTree::Leaf { graph, cograph, is_r10, labels, .. } => {
            if graph.is_none() && cograph.is_none() && !is_r10 {
                Some(labels.clone())
            } else {
                None
            }
        }
        DecompositionTree::Internal { left, right, .. } => {
            match (smallest_irregular_leaf_labels(left), smallest_irregular_leaf_labels(right)) {
                (Some(l), Some(r)) => Some(if l.len() <= r.len() { l } else { r }),
                (Some(l), None) => Some(l),
                (None, Some(r)) => Some(r),
                (None, None) => None,
            }
        }
    }
}

fn gather(m: &Matrix, rows: &[usize], cols: &[usize]) -> Matrix {
    let mut out = Matrix::zeros(rows.len(), cols.len());
    for (oi, &i) in rows.iter().enumerate() {
        for (oj, &j) in cols.iter().enumerate() {
            out.set(oi, oj, m.get(i, j));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_wheel_matrix_is_regular() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
            1, 1, 0,
            1, 1, 1,
            0, 1, 1,
        ]);
        let decision = decide_tu(&m, true).expect("no pipeline errors");
        assert!(decision.is_regular);
        assert!(decision.violator.is_none());
        assert!(decision.tree.expect("tree was requested").is_fully_regular());
    }

    #[test]
    fn identity_is_regular() {
        let m = Matrix::from_row_major(4, 4, vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]);
        let decision = decide_tu(&m, false).expect("no pipeline errors");
        assert!(decision.is_regular);
        assert!(decision.tree.is_none());
    }

    #[test]
    fn small_2xn_matrix_is_regular_via_specialized_builder() {
        let m = Matrix::from_row_major(2, 3, vec![1, 1, 0, 0, 1, 1]);
        let decision = decide_tu(&m, true).expect("no pipeline errors");
        assert!(decision.is_regular);
    }

    #[test]
    fn out_of_domain_entry_is_reported_non_tu_with_a_1x1_violator() {
        // spec.md §8 scenario 5: TU = false, violator is the 1x1 containing the 2.
        let m = Matrix::from_row_major(1, 1, vec![2]);
        let decision = decide_tu(&m, false).expect("a domain violation is not a pipeline error");
        assert!(!decision.is_regular);
        let violator = decision.violator.expect("non-TU decision carries a violator");
        assert_eq!(violator.rows, vec![0]);
        assert_eq!(violator.columns, vec![0]);
    }

    #[test]
    fn out_of_domain_entry_inside_a_larger_matrix_is_reported_non_tu() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(2, 2, vec![
            1, 0,
            0, 3,
        ]);
        let decision = decide_tu(&m, false).expect("a domain violation is not a pipeline error");
        assert!(!decision.is_regular);
        let violator = decision.violator.expect("non-TU decision carries a violator");
        assert_eq!(violator.rows, vec![1]);
        assert_eq!(violator.columns, vec![1]);
    }

    /// spec.md §8 scenario 6: a direct sum of W3 and a 4-edge path's cycle
    /// matrix, sharing one column. Rows 0..3 x cols 0..3 is W3; rows 3..7 x
    /// col 2 carries the shared column's values into the second piece; col 3
    /// is the second piece's own non-tree edge.
    #[rustfmt::skip]
    fn scenario_6_parent() -> Matrix {
        Matrix::from_row_major(7, 4, vec![
            1, 1, 0, 0,
            1, 1, 1, 0,
            0, 1, 1, 0,
            0, 0, 1, 0,
            0, 0, 1, 0,
            0, 0, 0, 1,
            0, 0, 0, 1,
        ])
    }

    #[test]
    fn two_sum_split_reproduces_the_exact_join_components() {
        let full = scenario_6_parent();
        let row_labels: Vec<ElementLabel> = (0..7).map(|i| -(i + 1)).collect();
        let col_labels: Vec<ElementLabel> = (0..4).map(|j| j + 1).collect();
        let sep = Separation::two_separation((3, 3), (3, 2));

        let (left, left_labels, right, right_labels, kind) = two_sum_split(&full, &row_labels, &col_labels, &sep);

        assert_eq!(kind, SeparationKind::TwoSum);

        #[rustfmt::skip]
        let expected_left = Matrix::from_row_major(4, 3, vec![
            1, 1, 0,
            1, 1, 1,
            0, 1, 1,
            0, 0, 1,
        ]);
        assert_eq!(left, expected_left);
        assert_eq!(left_labels.0, vec![-1, -2, -3, -4]);
        assert_eq!(left_labels.1, vec![1, 2, 3]);

        #[rustfmt::skip]
        let expected_right = Matrix::from_row_major(4, 2, vec![
            1, 0,
            1, 0,
            0, 1,
            0, 1,
        ]);
        assert_eq!(right, expected_right);
        assert_eq!(right_labels.0, vec![-4, -5, -6, -7]);
        assert_eq!(right_labels.1, vec![3, 4]);
    }

    #[test]
    fn scenario_6_tu_of_parent_matches_tu_of_reconstructed_components() {
        let full = scenario_6_parent();
        let row_labels: Vec<ElementLabel> = (0..7).map(|i| -(i + 1)).collect();
        let col_labels: Vec<ElementLabel> = (0..4).map(|j| j + 1).collect();
        let sep = Separation::two_separation((3, 3), (3, 2));

        let (left, _, right, _, _) = two_sum_split(&full, &row_labels, &col_labels, &sep);

        let left_decision = decide_tu(&left, true).expect("no pipeline errors");
        let right_decision = decide_tu(&right, true).expect("no pipeline errors");
        let parent_decision = decide_tu(&full, true).expect("no pipeline errors");

        assert!(left_decision.is_regular, "the left child (W3 plus its connecting row) is TU");
        assert!(right_decision.is_regular, "the right child (the path's own piece) is TU");
        assert_eq!(
            parent_decision.is_regular,
            left_decision.is_regular && right_decision.is_regular,
            "TU(parent) must equal TU(left) && TU(right) for an exact 2-sum join"
        );

        let tree = parent_decision.tree.expect("tree was requested");
        assert!(tree.is_fully_regular());
    }
}
