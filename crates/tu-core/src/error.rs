//! Error kinds for the total-unimodularity core.
//!
//! Three kinds, matching the contract the rest of the workspace builds on:
//!
//! - [`CoreError::DomainViolation`]: an input entry outside `{-1,0,+1}`. Not a
//!   bug — the caller's "is it TU?" answer is trivially `false`, witnessed by
//!   the offending cell as a 1x1 violator.
//! - [`CoreError::NotSigned`]: signing found an unrepairable/violating
//!   submatrix (test mode only; repair mode never returns this).
//! - [`CoreError::InvariantBroken`]: a precondition internal to the pipeline
//!   was violated (pivot on a zero entry, signing sum outside {0,2} mod 4,
//!   BFS failed to reach a node it was promised to reach). These are bugs,
//!   not input problems, and are propagated as fatal.
//! - [`CoreError::Overflow`]: auxiliary determinant arithmetic overflowed
//!   while shrinking a violator.
//!
//! No `thiserror` here: a hand-rolled `Display`/`Error` impl keeps this
//! crate's dependency footprint minimal.

use std::fmt;

use crate::matrix::SubmatrixIndices;

/// Errors surfaced by the total-unimodularity core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An entry outside `{-1,0,+1}` was found at `(row, col)` with the given value.
    DomainViolation {
        /// Row index of the offending entry.
        row: usize,
        /// Column index of the offending entry.
        col: usize,
        /// The offending value.
        value: i64,
    },
    /// Signing (test mode) found a violating submatrix.
    NotSigned(SubmatrixIndices),
    /// An internal precondition was violated; this indicates an implementation bug.
    InvariantBroken(&'static str),
    /// Auxiliary arithmetic (determinant computation for violator reporting) overflowed.
    Overflow(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainViolation { row, col, value } => write!(
                f,
                "entry ({row}, {col}) = {value} is outside {{-1,0,+1}}"
            ),
            Self::NotSigned(sub) => write!(
                f,
                "matrix is not a signed version of its support; violator rows={:?} cols={:?}",
                sub.rows, sub.columns
            ),
            Self::InvariantBroken(msg) => write!(f, "internal invariant broken: {msg}"),
            Self::Overflow(msg) => write!(f, "arithmetic overflow: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Convenience alias used throughout the core crates.
pub type CoreResult<T> = Result<T, CoreError>;
