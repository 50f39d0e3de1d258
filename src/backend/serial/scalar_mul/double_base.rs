#![allow(non_snake_case)]

//! Constant-time computation of \\(s\_1 P + s\_2 Q\\), interleaving two
//! signed fixed-window ladders so the doublings are shared.

use zeroize::Zeroize;
use zeroize::Zeroizing;

use subtle::ConditionallyNegatable;

use crate::backend::serial::scalar_mul::signed_window_digit;
use crate::backend::serial::u64::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::LookupTable;

/// Compute \\(s\_1 P + s\_2 Q\\) in constant time, up to 4-torsion.
pub(crate) fn mul(P: &EdwardsPoint, s1: &Scalar, Q: &EdwardsPoint, s2: &Scalar) -> EdwardsPoint {
    let a1 = Zeroizing::new((s1 + &constants::POINT_SCALARMUL_ADJUSTMENT).halve());
    let a2 = Zeroizing::new((s2 + &constants::POINT_SCALARMUL_ADJUSTMENT).halve());

    let mut table1 = LookupTable::from(P);
    let mut table2 = LookupTable::from(Q);

    let mut R = EdwardsPoint::identity();
    for i in (0..64).rev() {
        R = R.mul_by_pow_2(4);

        let (idx, neg) = signed_window_digit(a1.as_bytes(), i);
        let mut T = table1.select(idx);
        T.conditional_negate(neg);
        R = (&R + &T).to_extended();

        let (idx, neg) = signed_window_digit(a2.as_bytes(), i);
        let mut T = table2.select(idx);
        T.conditional_negate(neg);
        R = (&R + &T).to_extended();
    }

    table1.zeroize();
    table2.zeroize();
    R
}
