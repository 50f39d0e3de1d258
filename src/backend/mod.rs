//! Pluggable implementations for different architectures.
//!
//! Only the `u64` serial backend is provided: five 51-bit limbs for the
//! field and five 52-bit limbs for scalars, with `u128` products.

pub mod serial;
