//! Bipartite BFS over a (possibly masked) matrix.
//!
//! Ported from `bipartite_graph_bfs.hpp`'s sentinel convention: a node not in
//! `end_nodes` starts at distance `-1` (unreached); a node in `end_nodes`
//! starts at distance `-2` ("registered as a target, not yet reached") so a
//! start node that is *also* an end node is still counted as satisfied up
//! front. BFS enqueues row neighbors in column-index order and column
//! neighbors in row-index order, matching spec.md §5's ordering guarantee.

use crate::bipartite::BipartiteDims;
use crate::matrix::Entries;
use std::collections::VecDeque;

/// Sentinel: node is unreachable.
pub const UNREACHED: i64 = -1;
/// Sentinel: node is registered as a BFS target but not yet reached.
pub const TARGET_PENDING: i64 = -2;

/// One node's BFS result: its distance from the nearest start node (or a
/// sentinel) and its predecessor in the search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BfsNode {
    pub distance: i64,
    pub predecessor: usize,
}

impl BfsNode {
    #[inline]
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.distance >= 0
    }
}

/// Run a BFS on the bipartite graph where edge `(row, col)` exists iff
/// `matrix.entry(row, col) != 0`.
///
/// `start_nodes` seed the search at distance 0. `end_nodes` are the targets;
/// if `reach_all` is set, BFS continues until every end node (not already a
/// start node) is reached or the frontier empties; otherwise it stops at the
/// first end node reached. Returns `(results, satisfied)` where `satisfied`
/// means "all needed end nodes were reached".
#[must_use]
pub fn bipartite_bfs<E: Entries>(
    matrix: &E,
    dims: BipartiteDims,
    start_nodes: &[usize],
    end_nodes: &[usize],
    reach_all: bool,
) -> (Vec<BfsNode>, bool) {
    let size = dims.size();
    let height = dims.height();
    let mut result = vec![
        BfsNode {
            distance: UNREACHED,
            predecessor: 0,
        };
        size
    ];

    let mut needed = if reach_all {
        end_nodes.len() as i64
    } else {
        i64::from(!end_nodes.is_empty())
    };

    let mut queue: VecDeque<usize> = VecDeque::new();
    for &s in start_nodes {
        result[s].distance = 0;
        result[s].predecessor = s;
        queue.push_back(s);
    }
    for &e in end_nodes {
        if result[e].distance == 0 {
            needed -= 1;
        } else {
            result[e].distance = TARGET_PENDING;
        }
    }

    if needed <= 0 {
        return (result, true);
    }

    while let Some(current) = queue.pop_front() {
        let current_distance = result[current].distance;
        if dims.is_row(current) {
            let row = dims.index_to_row(current);
            for col in 0..dims.width() {
                let neighbor = dims.column_to_index(col);
                if !result[neighbor].is_reachable() && matrix.is_nonzero(row, col) {
                    if result[neighbor].distance == TARGET_PENDING {
                        needed -= 1;
                    }
                    result[neighbor].distance = current_distance + 1;
                    result[neighbor].predecessor = current;
                    if needed <= 0 {
                        return (result, true);
                    }
                    queue.push_back(neighbor);
                }
            }
        } else {
            let col = dims.index_to_column(current);
            for row in 0..height {
                let neighbor = dims.row_to_index(row);
                if !result[neighbor].is_reachable() && matrix.is_nonzero(row, col) {
                    if result[neighbor].distance == TARGET_PENDING {
                        needed -= 1;
                    }
                    result[neighbor].distance = current_distance + 1;
                    result[neighbor].predecessor = current;
                    if needed <= 0 {
                        return (result, true);
                    }
                    queue.push_back(neighbor);
                }
            }
        }
    }
    (result, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn finds_shortest_path_between_two_rows_via_shared_column() {
        // rows 0,1 both touch column 0.
        let m = Matrix::from_row_major(2, 1, vec![1, 1]);
        let dims = BipartiteDims::new(2, 1);
        let (result, ok) = bipartite_bfs(&m, dims, &[0], &[1], true);
        assert!(ok);
        assert_eq!(result[1].distance, 2);
    }

    #[test]
    fn unreachable_end_node_reports_failure() {
        let m = Matrix::from_row_major(2, 1, vec![1, 0]);
        let dims = BipartiteDims::new(2, 1);
        let (_result, ok) = bipartite_bfs(&m, dims, &[0], &[1], true);
        assert!(!ok);
    }

    #[test]
    fn start_node_that_is_also_an_end_node_counts_as_satisfied() {
        let m = Matrix::from_row_major(1, 1, vec![0]);
        let dims = BipartiteDims::new(1, 1);
        let (_result, ok) = bipartite_bfs(&m, dims, &[0], &[0], true);
        assert!(ok);
    }
}
