#![allow(non_snake_case)]

//! Constant-time scalar multiplication of an arbitrary point, using a
//! signed 4-bit fixed window over a table of odd multiples.

use zeroize::Zeroize;
use zeroize::Zeroizing;

use subtle::ConditionallyNegatable;

use crate::backend::serial::scalar_mul::signed_window_digit;
use crate::backend::serial::u64::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::LookupTable;

/// Perform constant-time, variable-base scalar multiplication.
///
/// The result is congruent to \\([s]P\\) modulo the 4-torsion
/// subgroup: the signed-digit expansion evaluates to \\(s + m\ell\\)
/// for some integer \\(m\\), and \\(\ell\\)-multiples of any
/// representative land in the torsion the Ristretto quotient
/// identifies with zero.
pub(crate) fn mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    // Offset by (2^256 - 1) mod l and halve, so that the 64 nibbles
    // b_i of the result satisfy  sum (2 b_i - 15) 16^i = s (mod l),
    // with every digit odd.
    let adjusted = Zeroizing::new((scalar + &constants::POINT_SCALARMUL_ADJUSTMENT).halve());

    // Table of odd multiples P, 3P, ..., 15P.
    let mut lookup_table = LookupTable::from(point);

    let mut Q = EdwardsPoint::identity();
    for i in (0..64).rev() {
        Q = Q.mul_by_pow_2(4);
        let (idx, neg) = signed_window_digit(adjusted.as_bytes(), i);
        let mut R = lookup_table.select(idx);
        R.conditional_negate(neg);
        Q = (&Q + &R).to_extended();
    }

    lookup_table.zeroize();
    Q
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::u64::constants::ED25519_BASEPOINT_POINT;

    #[test]
    fn small_scalars_match_repeated_addition() {
        let B = ED25519_BASEPOINT_POINT;
        let mut expected = EdwardsPoint::identity();
        for k in 0u64..20 {
            assert_eq!(mul(&B, &Scalar::from(k)), expected);
            expected = &expected + &B;
        }
    }

    #[test]
    fn zero_scalar_gives_identity() {
        let B = ED25519_BASEPOINT_POINT;
        assert_eq!(mul(&B, &Scalar::zero()), EdwardsPoint::identity());
    }

    #[test]
    fn distributes_over_scalar_addition() {
        let B = ED25519_BASEPOINT_POINT;
        let a = Scalar::from(92384756u64);
        let b = Scalar::from(48302u64);
        let lhs = mul(&B, &(&a + &b));
        let rhs = &mul(&B, &a) + &mul(&B, &b);
        assert_eq!(lhs, rhs);
    }
}
