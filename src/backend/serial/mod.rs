//! Serial (non-vectorized) arithmetic backends and the scalar
//! multiplication routines built on them.

pub mod u64;

pub mod scalar_mul;
