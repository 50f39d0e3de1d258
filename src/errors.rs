//! Errors surfaced at the byte-oriented API edge.
//!
//! The constant-time interior of the crate signals failure through
//! `subtle::Choice` and `CtOption`; these error values exist for the
//! slice-conversion entry points, where inputs are public and a
//! conventional `Result` is the friendlier shape.

use thiserror::Error;

/// Errors produced when parsing wire-format inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input slice did not have the expected length.
    #[error("expected a {expected}-byte encoding, got {actual} bytes")]
    WrongLength {
        /// The required encoding length.
        expected: usize,
        /// The length that was provided.
        actual: usize,
    },

    /// The 32 bytes were not the canonical encoding of any group element.
    #[error("malformed Ristretto point encoding")]
    MalformedPoint,

    /// The 32 bytes were not the canonical encoding of a scalar mod l.
    #[error("malformed scalar encoding")]
    MalformedScalar,
}
