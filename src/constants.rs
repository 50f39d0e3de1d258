//! Constants exported at the crate boundary: the generator and its
//! canonical encoding, the group order, and the precomputed tables.
//!
//! The tables are a function of the curve parameters only.  They are
//! built on first use behind a one-shot initializer, after which they
//! are immutable and freely shareable between threads.

use once_cell::sync::Lazy;

use crate::backend::serial::u64::constants as backend;
use crate::edwards::AffineNielsPoint;
use crate::ristretto::{CompressedRistretto, RistrettoBasepointTable, RistrettoPoint};
use crate::scalar::Scalar;
use crate::window::NafLookupTable7;

/// The Ristretto generator, as a `RistrettoPoint`.
pub const RISTRETTO_BASEPOINT_POINT: RistrettoPoint =
    RistrettoPoint(backend::ED25519_BASEPOINT_POINT);

/// The canonical 32-byte encoding of the generator.
pub const RISTRETTO_BASEPOINT_COMPRESSED: CompressedRistretto = CompressedRistretto([
    0xe2, 0xf2, 0xae, 0x0a, 0x6a, 0xbc, 0x4e, 0x71,
    0xa8, 0x84, 0xa9, 0x61, 0xc5, 0x00, 0x51, 0x5f,
    0x58, 0xe3, 0x0b, 0x6a, 0xa5, 0x82, 0xdd, 0x8d,
    0xb6, 0xa6, 0x59, 0x45, 0xe0, 0x8d, 0x2d, 0x76,
]);

/// `BASEPOINT_ORDER` is the order of the Ristretto group and of its
/// generator, i.e.,
/// $$
/// \ell = 2\^{252} + 27742317777372353535851937790883648493.
/// $$
pub const BASEPOINT_ORDER: Scalar = Scalar {
    bytes: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
        0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ],
};

/// Number of meaningful low bits in the `hint` parameter of
/// [`RistrettoPoint::invert_elligator_nonuniform`]; all higher bits
/// are ignored.
pub const INVERT_ELLIGATOR_WHICH_BITS: u32 = 5;

/// The signed-comb table for the generator, used by
/// [`RistrettoPoint::mul_base`] and the `Scalar * &RISTRETTO_BASEPOINT_TABLE`
/// operator.
pub static RISTRETTO_BASEPOINT_TABLE: Lazy<RistrettoBasepointTable> =
    Lazy::new(|| RistrettoBasepointTable::create(&RISTRETTO_BASEPOINT_POINT));

/// Odd multiples \\(B, 3B, \ldots, 63B\\) of the generator in affine
/// Niels form, for the variable-time wNAF path.
pub(crate) static AFFINE_ODD_MULTIPLES_OF_BASEPOINT: Lazy<NafLookupTable7<AffineNielsPoint>> =
    Lazy::new(|| NafLookupTable7::from_basepoint(&backend::ED25519_BASEPOINT_POINT));

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::{Identity, IsIdentity};

    #[test]
    fn generator_encodes_to_the_published_bytes() {
        assert_eq!(
            RISTRETTO_BASEPOINT_POINT.compress(),
            RISTRETTO_BASEPOINT_COMPRESSED
        );
    }

    #[test]
    fn generator_has_order_l() {
        // (l - 1) B + B == identity
        let l_minus_one = &BASEPOINT_ORDER - &Scalar::one();
        let almost = &RISTRETTO_BASEPOINT_POINT * &l_minus_one;
        assert!((&almost + &RISTRETTO_BASEPOINT_POINT).is_identity());
    }

    #[test]
    fn table_matches_variable_base() {
        for &k in &[0u64, 1, 2, 31, 982374987] {
            let s = Scalar::from(k);
            assert_eq!(
                RISTRETTO_BASEPOINT_TABLE.mul_base(&s),
                &RISTRETTO_BASEPOINT_POINT * &s
            );
        }
    }

    #[test]
    fn scalar_mul_by_order_is_identity() {
        assert!((&RISTRETTO_BASEPOINT_POINT * &BASEPOINT_ORDER).is_identity());
        assert_eq!(
            RistrettoPoint::mul_base(&BASEPOINT_ORDER),
            RistrettoPoint::identity()
        );
    }
}
