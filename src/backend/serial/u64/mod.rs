//! The `u64` backend: limb arithmetic with 64-bit words and 128-bit
//! intermediate products.

pub mod constants;
pub mod field;
pub mod scalar;
