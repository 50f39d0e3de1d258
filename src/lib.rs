//! A pure-Rust implementation of the ristretto255 prime-order group.
//!
//! Ristretto builds a group of prime order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\)
//! on top of the Edwards form of Curve25519 by quotienting out the
//! curve's 4-torsion and fixing a canonical 32-byte encoding for each
//! coset.  Protocols get the abstraction they actually want: a
//! prime-order group with complete, constant-time operations, without
//! the cofactor and the bugs it breeds.
//!
//! The public surface is:
//!
//! * [`ristretto::RistrettoPoint`] and [`ristretto::CompressedRistretto`]:
//!   group elements and their canonical wire form, with encoding,
//!   validated decoding, torsion-aware equality, the Elligator
//!   hash-to-group maps (and the non-uniform map's inverse), and the
//!   EdDSA interop encodings;
//! * [`scalar::Scalar`]: integers mod \\( \ell \\), with
//!   Montgomery-backed arithmetic, validated decoding, inversion, and
//!   batch inversion;
//! * [`constants`]: the generator, its encoding, the group order, and
//!   the precomputed fixed-base tables;
//! * scalar multiplication in several shapes: `&Scalar * &RistrettoPoint`
//!   (constant-time fixed window),
//!   `RistrettoPoint::mul_base` (precomputed signed combs),
//!   `RistrettoPoint::double_scalar_mul` / `dual_scalar_mul`
//!   (constant-time), and
//!   `RistrettoPoint::vartime_double_scalar_mul_basepoint` for
//!   verification equations over public scalars.
//!
//! Every operation on secret data runs in constant time: no branches,
//! table indices, or variable-latency arithmetic depend on secret
//! values, and scratch buffers holding secret material are zeroed on
//! every exit path.  The one deliberate exception is the
//! `vartime_` path, which says so in its name.

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub mod backend;
pub mod constants;
pub mod edwards;
pub mod errors;
pub mod field;
pub mod ristretto;
pub mod scalar;
pub mod traits;
pub(crate) mod window;

pub use crate::errors::Error;
pub use crate::ristretto::{CompressedRistretto, RistrettoBasepointTable, RistrettoPoint};
pub use crate::scalar::Scalar;
