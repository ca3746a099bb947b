//! A fixed-size bitset that allocates exactly once: when it is created.
//!
//! After construction no operation allocates. The exception is turning the
//! bitset into an owned `String` via its [`Display`](core::fmt::Display)
//! impl. `no_std` compatible (needs `alloc` for the one buffer).
//!
//! [`FixedBitSet`] is the main struct in this library. Its
//! [features](#features) are listed below.
//!
//! # Examples
//! ```
//! use zero_alloc_bitset::FixedBitSet;
//!
//! let mut bits = FixedBitSet::new(100);
//! assert_eq!(bits.popcount(), 0);
//! bits.set(3)?;
//! bits.set(99)?;
//! assert!(bits.get(3)?);
//! assert_eq!(bits.popcount(), 2);
//! assert!(bits.set(100).is_err());
//! # Ok::<(), zero_alloc_bitset::Error>(())
//! ```
//!
//! # Use Cases
//!
//! - Hot loops that reuse scratch bitsets and must not touch the allocator
//! - Latency-sensitive code where allocation unpredictability must be avoided
//! - Does not synchronize internally. Wrap it in your own lock to share it
//!   between threads
//!
//! # Features
//!
//! - Bit access with checked indices: `set`, `clear`, `get`
//! - In-place boolean algebra: `and`, `and_not`, `or`
//! - Whole-vector operations: `zero`, `copy_from`, `popcount`
//! - Zero-copy access to the backing bytes: `bytes`, `bytes_mut`
//! - Allocation-free iteration over all, set or unset bits:
//!   - `iter()` (all bits as bools)
//!   - `iter_ones()` (indices of set bits)
//!   - `iter_zeros()` (indices of unset bits)
//! - Out-of-range indices and mismatched operands are reported through
//!   [`Error`] instead of panicking
//!
//! # Cargo features
//!
//! - `std` (default): implements `std::error::Error` integration through
//!   `thiserror` and enables `tracing`'s std support. Disable it to build
//!   for `no_std` + `alloc` targets.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitset;
mod error;

pub use bitset::{FixedBitSet, Iter, IterOnes, IterZeros, byte_len_for};
pub use error::Error;
