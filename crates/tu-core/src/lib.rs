// crates/tu-core/src/lib.rs

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Core data types for the total-unimodularity decision and its regular-
//! matroid decomposition certificate: dense matrix storage and cheap logical
//! views, permutations, bipartite indexing and BFS, binary linear spaces,
//! matroid element-label handles, and the decomposition-tree shape itself.
//!
//! This crate has no opinion on *how* a decision is reached — that is
//! `tu-signing` / `tu-minors` / `tu-graphic` / `tu-separation` /
//! `tu-scheduler`. It only fixes the vocabulary they share.

pub mod bfs;
pub mod bipartite;
pub mod error;
pub mod linear_space;
pub mod matrix;
pub mod matroid;
pub mod permutation;
pub mod tree;

pub use bfs::{bipartite_bfs, BfsNode};
pub use bipartite::BipartiteDims;
pub use error::{CoreError, CoreResult};
pub use linear_space::{gf2_rank, BinaryLinearSpace, GfVector};
pub use matrix::{
    zero_block_modifier, Entries, MaskedView, Matrix, PermutedMatrix, SubmatrixIndices,
    TransposedView,
};
pub use matroid::{ElementLabel, MatroidHandle};
pub use permutation::Permutation;
pub use tree::{
    CertificateGraph, DecompositionTree, ExtensionTag, LabeledEdge, NestedMinorSequence,
    Separation, SeparationKind,
};
