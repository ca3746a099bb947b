//! Error types for bitset operations.

use thiserror::Error;

/// Errors returned by [`FixedBitSet`](crate::FixedBitSet) operations.
///
/// An operation that returns an error leaves the bitset unmodified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A bit index was at or beyond the bitset's length.
    #[error("bit index {idx} out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        idx: usize,
        /// The bitset's length in bits.
        len: usize,
    },
    /// The operand's backing buffer does not have the receiver's byte length.
    #[error("byte length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Byte length of the receiver.
        expected: usize,
        /// Byte length of the operand.
        found: usize,
    },
}
