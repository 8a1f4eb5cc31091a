//! Nested-minor extension tags, separations, and the decomposition tree.

use crate::matroid::ElementLabel;

/// One of the five ways a nested minor can grow by one step (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtensionTag {
    /// +1 row, +0 columns.
    OneRow,
    /// +0 rows, +1 column.
    OneColumn,
    /// +1 row, +1 column.
    OneRowOneColumn,
    /// +2 rows, +1 column.
    TwoRowsOneColumn,
    /// +1 row, +2 columns.
    OneRowTwoColumns,
}

impl ExtensionTag {
    /// Row/column growth `(delta_rows, delta_cols)` contributed by this tag.
    #[must_use]
    pub fn delta(self) -> (usize, usize) {
        match self {
            Self::OneRow => (1, 0),
            Self::OneColumn => (0, 1),
            Self::OneRowOneColumn => (1, 1),
            Self::TwoRowsOneColumn => (2, 1),
            Self::OneRowTwoColumns => (1, 2),
        }
    }
}

/// A sequence of extension tags; total size is always `3 + sum of deltas`
/// starting from the W3 minor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NestedMinorSequence {
    tags: Vec<ExtensionTag>,
}

impl NestedMinorSequence {
    #[must_use]
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn push(&mut self, tag: ExtensionTag) {
        self.tags.push(tag);
    }

    #[must_use]
    pub fn tags(&self) -> &[ExtensionTag] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// `(height, width)` of the minor after applying every tag, starting from W3 (3x3).
    #[must_use]
    pub fn final_size(&self) -> (usize, usize) {
        self.tags.iter().fold((3, 3), |(h, w), tag| {
            let (dr, dc) = tag.delta();
            (h + dr, w + dc)
        })
    }
}

/// A k-separation: a row/column bipartition of the ground set.
///
/// `split = (h1, w1)` means rows `[0, h1)` and columns `[0, w1)` form one
/// side of the partition in the current logical ordering; the complement is
/// the other side. `rank` is `lower_left_rank + upper_right_rank` over GF(2)
/// and determines whether this is a 1-, 2-, or 3-separation
/// (`rank + 1 == k`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Separation {
    /// `(h1, w1)`: size of the upper-left block that is one side of the split.
    pub split: (usize, usize),
    /// Up to two witness positions outside the upper-left block.
    pub witnesses: Vec<(usize, usize)>,
    /// `lower_left_rank + upper_right_rank`, in `{0, 1, 2}`.
    pub rank: usize,
    /// Set when a 2-separation must be re-expressed via a special swap when
    /// re-embedding into the original coordinate frame (spec.md §4.4).
    pub special_swap: Option<(usize, usize)>,
}

impl Separation {
    /// A trivial 1-separation at the given split, with no witnesses (rank 0).
    #[must_use]
    pub fn one_separation(split: (usize, usize)) -> Self {
        Self {
            split,
            witnesses: Vec::new(),
            rank: 0,
            special_swap: None,
        }
    }

    /// A 2-separation at the given split with one witness position (rank 1).
    #[must_use]
    pub fn two_separation(split: (usize, usize), witness: (usize, usize)) -> Self {
        Self {
            split,
            witnesses: vec![witness],
            rank: 1,
            special_swap: None,
        }
    }

    /// A 3-separation at the given split with up to two witnesses (rank 2).
    #[must_use]
    pub fn three_separation(split: (usize, usize), witnesses: Vec<(usize, usize)>) -> Self {
        Self {
            split,
            witnesses,
            rank: 2,
            special_swap: None,
        }
    }

    /// The separation "kind" `k` such that `rank + 1 == k`.
    #[must_use]
    pub fn kind(&self) -> usize {
        self.rank + 1
    }
}

/// The kind of split combining two children back into their parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeparationKind {
    OneSum,
    TwoSum,
    ThreeSum,
}

/// A graph edge, carrying the matroid element label it represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabeledEdge {
    pub u: usize,
    pub v: usize,
    pub label: ElementLabel,
}

/// A constructed graph witnessing graphicness (or cographicness, for the
/// transposed matroid). Simple undirected multigraph, vertices are dense
/// `0..n`, each edge carries exactly one matroid element label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateGraph {
    pub num_vertices: usize,
    pub edges: Vec<LabeledEdge>,
}

/// One node of a decomposition tree (spec.md §3).
#[derive(Clone, Debug)]
pub enum DecompositionTree {
    /// A 3-connected piece classified as graphic, cographic, or R10.
    Leaf {
        graph: Option<CertificateGraph>,
        cograph: Option<CertificateGraph>,
        is_r10: bool,
        labels: Vec<ElementLabel>,
        extra_labels: Vec<ElementLabel>,
    },
    /// A split at a 1-, 2-, or 3-separation.
    Internal {
        left: Box<DecompositionTree>,
        right: Box<DecompositionTree>,
        kind: SeparationKind,
        labels: Vec<ElementLabel>,
        extra_labels: Vec<ElementLabel>,
    },
}

impl DecompositionTree {
    /// Whether every leaf under this node is graphic, cographic, or R10 (i.e.
    /// the matroid this tree certifies is regular).
    #[must_use]
    pub fn is_fully_regular(&self) -> bool {
        match self {
            Self::Leaf {
                graph, cograph, is_r10, ..
            } => graph.is_some() || cograph.is_some() || *is_r10,
            Self::Internal { left, right, .. } => left.is_fully_regular() && right.is_fully_regular(),
        }
    }

    /// The element-label set at this node.
    #[must_use]
    pub fn labels(&self) -> &[ElementLabel] {
        match self {
            Self::Leaf { labels, .. } | Self::Internal { labels, .. } => labels,
        }
    }

    /// Number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}
