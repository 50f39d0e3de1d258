#![allow(non_snake_case)]

//! Constant-time computation of the pair \\((s\_1 P, s\_2 P)\\).
//!
//! Both products share one walk over the doublings of \\(P\\): each
//! window's multiple of \\(P\\) is deposited into a signed bucket per
//! output, and the buckets are combined at the end with the
//! suffix-sum pass.  All bucket reads and writes are constant-time
//! masked sweeps, because the bucket indices are scalar digits.

use zeroize::Zeroize;
use zeroize::Zeroizing;

use subtle::ConditionallyNegatable;

use crate::backend::serial::scalar_mul::signed_window_digit;
use crate::backend::serial::u64::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::window::AccumulatorTable;

/// Compute \\((s\_1 P, s\_2 P)\\) in constant time, up to 4-torsion.
pub(crate) fn mul(P: &EdwardsPoint, s1: &Scalar, s2: &Scalar) -> (EdwardsPoint, EdwardsPoint) {
    let a1 = Zeroizing::new((s1 + &constants::POINT_SCALARMUL_ADJUSTMENT).halve());
    let a2 = Zeroizing::new((s2 + &constants::POINT_SCALARMUL_ADJUSTMENT).halve());

    let mut buckets1 = AccumulatorTable::new();
    let mut buckets2 = AccumulatorTable::new();

    let mut working = *P;
    for i in 0..64 {
        if i != 0 {
            working = working.mul_by_pow_2(4);
        }

        let (idx1, neg1) = signed_window_digit(a1.as_bytes(), i);
        let (idx2, neg2) = signed_window_digit(a2.as_bytes(), i);

        let mut pn = working.to_projective_niels();

        pn.conditional_negate(neg1);
        let t = buckets1.lookup(idx1);
        buckets1.insert(&(&t + &pn).to_extended(), idx1);

        // flip from the first sign to the second
        pn.conditional_negate(neg1 ^ neg2);
        let t = buckets2.lookup(idx2);
        buckets2.insert(&(&t + &pn).to_extended(), idx2);
    }

    let r1 = combine(&mut buckets1);
    let r2 = combine(&mut buckets2);

    buckets1.zeroize();
    buckets2.zeroize();
    working.zeroize();

    (r1, r2)
}

/// Fold the buckets into `sum_k (2k + 1) M_k` with suffix sums:
/// one pass accumulates `sum_k k M_k`, which is doubled and joined
/// with the plain bucket sum.
fn combine(buckets: &mut AccumulatorTable) -> EdwardsPoint {
    let mut r = buckets.0[7];
    for k in (2..8).rev() {
        buckets.0[k - 1] = &buckets.0[k - 1] + &buckets.0[k];
        r = &r + &buckets.0[k - 1];
    }
    buckets.0[0] = &buckets.0[0] + &buckets.0[1];
    r = r.double();
    &r + &buckets.0[0]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::scalar_mul::variable_base;
    use crate::backend::serial::u64::constants::ED25519_BASEPOINT_POINT;

    #[test]
    fn matches_two_single_multiplications() {
        let B = ED25519_BASEPOINT_POINT;
        let s1 = Scalar::from(823052u64);
        let s2 = Scalar::from(99283745652u64);
        let (r1, r2) = mul(&B, &s1, &s2);
        assert_eq!(r1, variable_base::mul(&B, &s1));
        assert_eq!(r2, variable_base::mul(&B, &s2));
    }

    #[test]
    fn handles_equal_scalars() {
        let B = ED25519_BASEPOINT_POINT;
        let s = Scalar::from(5u64);
        let (r1, r2) = mul(&B, &s, &s);
        assert_eq!(r1, r2);
        assert_eq!(r1, variable_base::mul(&B, &s));
    }
}
