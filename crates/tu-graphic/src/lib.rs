// crates/tu-graphic/src/lib.rs

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Graphicness/cographicness builder and the R10 test (spec.md §4.5–4.6).
//!
//! Ported from `graphicness.hpp`'s incremental graph construction and
//! `src/cmr/regularity_r10.c`'s syntactic filter. Cographicness reuses the
//! same builder: callers pass a transposed matrix/matroid (rows and columns
//! swapped), since this module has no opinion on which orientation it sees.

use std::collections::{BTreeSet, HashMap, HashSet};

use tu_core::{
    CertificateGraph, ElementLabel, Entries, ExtensionTag, LabeledEdge, MatroidHandle,
    NestedMinorSequence, PermutedMatrix,
};

/// A [`CertificateGraph`] under construction, plus a row/column index ->
/// edge-position map so later extension steps can find "the edge for row
/// r" / "the edge for column c" without caring where in `graph.edges` the
/// builder happened to put it.
struct Builder {
    graph: CertificateGraph,
    row_edge_pos: Vec<usize>,
    col_edge_pos: Vec<usize>,
}

impl Builder {
    fn push_edge(&mut self, edge: LabeledEdge) -> usize {
        let pos = self.graph.edges.len();
        self.graph.edges.push(edge);
        pos
    }

    fn row_edge(&self, r: usize) -> LabeledEdge {
        self.graph.edges[self.row_edge_pos[r]]
    }

    fn col_edge(&self, c: usize) -> LabeledEdge {
        self.graph.edges[self.col_edge_pos[c]]
    }
}

/// Build a graph whose cycle matroid matches `matroid`/`matrix`, following
/// `sequence` one extension at a time, or return `None` ("not graphic").
#[must_use]
pub fn build_graphic_certificate(
    matroid: &MatroidHandle,
    matrix: &PermutedMatrix,
    sequence: &NestedMinorSequence,
) -> Option<CertificateGraph> {
    let mut b = initial_wheel(matroid);
    let mut h = 3usize;
    let mut w = 3usize;

    for &tag in sequence.tags() {
        let (dr, dc) = tag.delta();
        for c in w..w + dc {
            let new_label = matroid.col_label(c);
            extend_with_column(&mut b, matrix, h, c, new_label)?;
        }
        let new_w = w + dc;
        for r in h..h + dr {
            let new_label = matroid.row_label(r);
            extend_with_row(&mut b, matrix, r, new_w, new_label)?;
        }
        h += dr;
        w += dc;
    }

    Some(b.graph)
}

/// The canonical W3 graph: hub `0` plus rim `1,2,3`, built so its
/// fundamental-cycle matrix (tree = rows) is exactly
/// `[[1,1,0],[1,1,1],[0,1,1]]` — the pattern `find_wheel_minor` normalizes
/// the upper-left block to.
fn initial_wheel(matroid: &MatroidHandle) -> Builder {
    let graph = CertificateGraph {
        num_vertices: 4,
        edges: vec![
            LabeledEdge { u: 0, v: 2, label: matroid.row_label(0) },
            LabeledEdge { u: 0, v: 1, label: matroid.row_label(1) },
            LabeledEdge { u: 1, v: 3, label: matroid.row_label(2) },
            LabeledEdge { u: 1, v: 2, label: matroid.col_label(0) },
            LabeledEdge { u: 2, v: 3, label: matroid.col_label(1) },
            LabeledEdge { u: 0, v: 3, label: matroid.col_label(2) },
        ],
    };
    Builder { graph, row_edge_pos: vec![0, 1, 2], col_edge_pos: vec![3, 4, 5] }
}

/// `OneColumn` step: the new column `c` has support over rows `[0, h)`.
/// Graphic iff the corresponding edges form a simple path; if so, add an
/// edge between the path's endpoints.
fn extend_with_column(
    b: &mut Builder,
    matrix: &PermutedMatrix,
    h: usize,
    c: usize,
    new_label: ElementLabel,
) -> Option<()> {
    let edges: Vec<LabeledEdge> = (0..h).filter(|&r| matrix.entry(r, c) != 0).map(|r| b.row_edge(r)).collect();

    let (u, v) = path_endpoints(&edges)?;
    let pos = b.push_edge(LabeledEdge { u, v, label: new_label });
    b.col_edge_pos.push(pos);
    Some(())
}

/// `OneRow` step: the new row `r` has support over columns `[0, w)`.
fn extend_with_row(
    b: &mut Builder,
    matrix: &PermutedMatrix,
    r: usize,
    w: usize,
    new_label: ElementLabel,
) -> Option<()> {
    let o_edges: Vec<LabeledEdge> = (0..w).filter(|&c| matrix.entry(r, c) != 0).map(|c| b.col_edge(c)).collect();

    if let Some(v) = common_endpoint(&o_edges) {
        let new_vertex = b.graph.num_vertices;
        b.graph.num_vertices += 1;
        for e in &mut b.graph.edges {
            if o_edges.iter().any(|o| labels_eq(o, e)) {
                if e.u == v {
                    e.u = new_vertex;
                } else if e.v == v {
                    e.v = new_vertex;
                }
            }
        }
        let pos = b.push_edge(LabeledEdge { u: v, v: new_vertex, label: new_label });
        b.row_edge_pos.push(pos);
        return Some(());
    }

    let pos = split_at_articulation(&mut b.graph, &o_edges, new_label)?;
    b.row_edge_pos.push(pos);
    Some(())
}

fn labels_eq(a: &LabeledEdge, b: &LabeledEdge) -> bool {
    a.label == b.label
}

/// Whether `edges` form a simple path (every vertex has degree <= 2, the
/// edge set is connected, and it contains no cycle). Returns the two
/// endpoints (degree-1 vertices), or the single edge's endpoints if there is
/// only one edge.
fn path_endpoints(edges: &[LabeledEdge]) -> Option<(usize, usize)> {
    if edges.is_empty() {
        return None;
    }
    let mut degree: HashMap<usize, usize> = HashMap::new();
    for e in edges {
        *degree.entry(e.u).or_insert(0) += 1;
        *degree.entry(e.v).or_insert(0) += 1;
    }
    if degree.values().any(|&d| d > 2) {
        return None;
    }
    if edges.len() == 1 {
        return Some((edges[0].u, edges[0].v));
    }
    let endpoints: Vec<usize> = degree.iter().filter(|&(_, &d)| d == 1).map(|(&v, _)| v).collect();
    if endpoints.len() != 2 {
        return None; // disconnected or contains a cycle
    }
    if !is_connected(edges, endpoints[0]) {
        return None;
    }
    Some((endpoints[0], endpoints[1]))
}

fn is_connected(edges: &[LabeledEdge], start: usize) -> bool {
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for e in edges {
        adj.entry(e.u).or_default().push(e.v);
        adj.entry(e.v).or_default().push(e.u);
    }
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        if !seen.insert(v) {
            continue;
        }
        if let Some(neighbors) = adj.get(&v) {
            stack.extend(neighbors.iter().copied());
        }
    }
    let mut touched: HashSet<usize> = HashSet::new();
    for e in edges {
        touched.insert(e.u);
        touched.insert(e.v);
    }
    touched.iter().all(|v| seen.contains(v))
}

fn common_endpoint(edges: &[LabeledEdge]) -> Option<usize> {
    if edges.is_empty() {
        return None;
    }
    let first = edges[0];
    for &candidate in &[first.u, first.v] {
        if edges.iter().all(|e| e.u == candidate || e.v == candidate) {
            return Some(candidate);
        }
    }
    None
}

/// `OneRow` case 2: split at a unique articulation point of `graph` minus
/// `o_edges`. Simplified to the two-component case: when removing the
/// candidate vertex leaves exactly two components of the remaining graph,
/// move every edge of the candidate that lands on one component's side to
/// a new vertex. Returns the position of the newly pushed edge in
/// `graph.edges`. See DESIGN.md for why the general multi-component
/// bipartiteness test is not implemented.
fn split_at_articulation(graph: &mut CertificateGraph, o_edges: &[LabeledEdge], new_label: ElementLabel) -> Option<usize> {
    let remaining: Vec<LabeledEdge> = graph.edges.iter().copied().filter(|e| !o_edges.iter().any(|o| labels_eq(o, e))).collect();

    for candidate in 0..graph.num_vertices {
        let incident: Vec<LabeledEdge> = remaining.iter().copied().filter(|e| e.u == candidate || e.v == candidate).collect();
        if incident.len() < 2 {
            continue;
        }
        let without_candidate: Vec<LabeledEdge> =
            remaining.iter().copied().filter(|e| e.u != candidate && e.v != candidate).collect();
        let components = connected_components(graph.num_vertices, &without_candidate, candidate);
        if components.len() != 2 {
            continue;
        }
        let side_a = &components[0];
        let has_both_sides = incident.iter().any(|e| {
            let other = if e.u == candidate { e.v } else { e.u };
            side_a.contains(&other)
        }) && incident.iter().any(|e| {
            let other = if e.u == candidate { e.v } else { e.u };
            !side_a.contains(&other)
        });
        if !has_both_sides {
            continue;
        }

        let new_vertex = graph.num_vertices;
        graph.num_vertices += 1;
        for e in &mut graph.edges {
            if e.u != candidate && e.v != candidate {
                continue;
            }
            let other = if e.u == candidate { e.v } else { e.u };
            if !side_a.contains(&other) {
                continue;
            }
            if e.u == candidate {
                e.u = new_vertex;
            } else {
                e.v = new_vertex;
            }
        }
        let pos = graph.edges.len();
        graph.edges.push(LabeledEdge { u: candidate, v: new_vertex, label: new_label });
        return Some(pos);
    }
    None
}

fn connected_components(num_vertices: usize, edges: &[LabeledEdge], excluding: usize) -> Vec<BTreeSet<usize>> {
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for e in edges {
        adj.entry(e.u).or_default().push(e.v);
        adj.entry(e.v).or_default().push(e.u);
    }
    let mut seen: HashSet<usize> = HashSet::new();
    let mut components = Vec::new();
    for start in 0..num_vertices {
        if start == excluding || seen.contains(&start) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if !seen.insert(v) {
                continue;
            }
            component.insert(v);
            if let Some(neighbors) = adj.get(&v) {
                for &n in neighbors {
                    if n != excluding && !seen.contains(&n) {
                        stack.push(n);
                    }
                }
            }
        }
        components.push(component);
    }
    components
}

/// Outcome of the R10 test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R10Outcome {
    IsR10,
    NotR10,
}

/// Decide whether a 5x5 binary matrix represents the R10 matroid
/// (spec.md §4.6): a syntactic nonzero-count filter followed by
/// bipartite-isomorphism against the two canonical 10-node representations.
#[must_use]
pub fn test_r10(matrix: &dyn Entries) -> R10Outcome {
    if matrix.num_rows() != 5 || matrix.num_cols() != 5 {
        return R10Outcome::NotR10;
    }
    if !passes_count_filter(matrix) {
        return R10Outcome::NotR10;
    }
    if is_isomorphic(matrix, &canonical_balanced()) || is_isomorphic(matrix, &canonical_hub()) {
        R10Outcome::IsR10
    } else {
        R10Outcome::NotR10
    }
}

fn passes_count_filter(matrix: &dyn Entries) -> bool {
    let row_counts: Vec<usize> = (0..5).map(|r| (0..5).filter(|&c| matrix.is_nonzero(r, c)).count()).collect();
    let col_counts: Vec<usize> = (0..5).map(|c| (0..5).filter(|&r| matrix.is_nonzero(r, c)).count()).collect();
    valid_count_multiset(&row_counts) && valid_count_multiset(&col_counts)
}

fn valid_count_multiset(counts: &[usize]) -> bool {
    let threes = counts.iter().filter(|&&c| c == 3).count();
    let twos = counts.iter().filter(|&&c| c == 2).count();
    let fives = counts.iter().filter(|&&c| c == 5).count();
    if twos + threes + fives != 5 {
        return false;
    }
    (threes == 5) || (twos == 4 && fives == 1)
}

/// Canonical (3,3,3,3,3) R10 pattern: circulant with offsets `{0, 1, -1}`.
fn canonical_balanced() -> [[u8; 5]; 5] {
    let mut m = [[0u8; 5]; 5];
    for i in 0..5 {
        for &delta in &[0i64, 1, -1] {
            let j = (i as i64 + delta).rem_euclid(5) as usize;
            m[i][j] = 1;
        }
    }
    m
}

/// Canonical (2,2,2,2,5) R10 pattern: one all-ones row/column plus an
/// identity block elsewhere.
fn canonical_hub() -> [[u8; 5]; 5] {
    let mut m = [[0u8; 5]; 5];
    for i in 0..4 {
        m[i][i] = 1;
        m[i][4] = 1;
    }
    for j in 0..5 {
        m[4][j] = 1;
    }
    m
}

fn is_isomorphic(matrix: &dyn Entries, canonical: &[[u8; 5]; 5]) -> bool {
    let mut rows = [0usize, 1, 2, 3, 4];
    loop {
        let mut cols = [0usize, 1, 2, 3, 4];
        loop {
            if (0..5).all(|i| (0..5).all(|j| matrix.is_nonzero(rows[i], cols[j]) == (canonical[i][j] != 0))) {
                return true;
            }
            if !next_permutation(&mut cols) {
                break;
            }
        }
        if !next_permutation(&mut rows) {
            break;
        }
    }
    false
}

fn next_permutation(a: &mut [usize; 5]) -> bool {
    let n = a.len();
    let mut i = n - 1;
    while i > 0 && a[i - 1] >= a[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while a[j] <= a[i - 1] {
        j -= 1;
    }
    a.swap(i - 1, j);
    a[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tu_core::{Matrix, PermutedMatrix};

    #[test]
    fn w3_builds_directly_into_a_graphic_certificate() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 3, vec![
            1, 1, 0,
            1, 1, 1,
            0, 1, 1,
        ]);
        let matrix = PermutedMatrix::new(m);
        let matroid = MatroidHandle::new(3, 3);
        let sequence = NestedMinorSequence::new();
        let graph = build_graphic_certificate(&matroid, &matrix, &sequence).expect("W3 is graphic");
        assert_eq!(graph.num_vertices, 4);
        assert_eq!(graph.edges.len(), 6);
    }

    #[test]
    fn one_column_path_extension_adds_a_single_edge() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(3, 4, vec![
            1, 1, 0, 1,
            1, 1, 1, 1,
            0, 1, 1, 0,
        ]);
        let matrix = PermutedMatrix::new(m);
        let matroid = MatroidHandle::new(3, 4);
        let mut sequence = NestedMinorSequence::new();
        sequence.push(ExtensionTag::OneColumn);
        let graph = build_graphic_certificate(&matroid, &matrix, &sequence).expect("path column is graphic");
        assert_eq!(graph.edges.len(), 7);
    }

    #[test]
    fn one_row_one_column_step_keeps_the_certificate_consistent() {
        #[rustfmt::skip]
        let m = Matrix::from_row_major(4, 4, vec![
            1, 1, 0, 1,
            1, 1, 1, 1,
            0, 1, 1, 0,
            1, 1, 0, 1,
        ]);
        let matrix = PermutedMatrix::new(m);
        let matroid = MatroidHandle::new(4, 4);
        let mut sequence = NestedMinorSequence::new();
        sequence.push(ExtensionTag::OneRowOneColumn);
        let graph = build_graphic_certificate(&matroid, &matrix, &sequence).expect("one row one column is graphic");
        assert_eq!(graph.edges.len(), 8);
    }

    #[test]
    fn r10_hub_pattern_is_recognized() {
        let m = canonical_hub();
        let matrix = Matrix::from_row_major(5, 5, m.iter().flatten().map(|&v| i64::from(v)).collect());
        assert_eq!(test_r10(&matrix), R10Outcome::IsR10);
    }

    #[test]
    fn r10_balanced_pattern_is_recognized() {
        let m = canonical_balanced();
        let matrix = Matrix::from_row_major(5, 5, m.iter().flatten().map(|&v| i64::from(v)).collect());
        assert_eq!(test_r10(&matrix), R10Outcome::IsR10);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let matrix = Matrix::zeros(4, 5);
        assert_eq!(test_r10(&matrix), R10Outcome::NotR10);
    }
}
