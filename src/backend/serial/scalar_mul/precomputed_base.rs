#![allow(non_snake_case)]

//! Fixed-base scalar multiplication with Lim–Lee signed combs.
//!
//! The basepoint table holds `n * 2^(t-1)` affine Niels points for the
//! comb parameters `(n, t, s) = (3, 5, 17)`: three combs of five teeth
//! spaced 17 bits apart, covering all 255 bit positions of the recoded
//! scalar.  A multiplication is then 17 rows of one doubling and three
//! table additions.

use zeroize::Zeroizing;

use subtle::Choice;
use subtle::ConditionallyNegatable;

use crate::backend::serial::u64::constants;
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::CombLookupTable;

/// Number of combs.
pub(crate) const COMBS_N: usize = 3;
/// Teeth per comb.
pub(crate) const COMBS_T: usize = 5;
/// Bit spacing between a comb's teeth.
pub(crate) const COMBS_S: usize = 17;

/// A precomputed table of multiples of a basepoint, for accelerating
/// fixed-base scalar multiplication.
///
/// Immutable once built; build it once at startup (the `constants`
/// module does so lazily behind a one-shot initializer) and share it
/// freely between threads.
#[derive(Copy, Clone)]
pub struct EdwardsBasepointTable {
    combs: [CombLookupTable; COMBS_N],
}

impl EdwardsBasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    ///
    /// Each comb entry is a signed combination
    /// \\( \sum\_k \epsilon\_k 2^{s(k + jt)} B \\) with the top tooth
    /// always positive; entries are enumerated by a Gray code so each
    /// differs from its predecessor by a single tooth flip, which
    /// costs one addition.  The whole table is affinized with one
    /// batched inversion at the end.
    pub(crate) fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut entries = [EdwardsPoint::identity(); COMBS_N << (COMBS_T - 1)];

        let mut working = *basepoint;
        let mut start = EdwardsPoint::identity();
        let mut doubles = [EdwardsPoint::identity(); COMBS_T - 1];

        for i in 0..COMBS_N {
            // Doubling phase: accumulate the all-positive tooth sum for
            // this comb while recording the single-tooth offsets.
            for j in 0..COMBS_T {
                start = if j == 0 { working } else { &start + &working };

                if j == COMBS_T - 1 && i == COMBS_N - 1 {
                    break;
                }

                working = working.double();
                if j < COMBS_T - 1 {
                    doubles[j] = working;
                }
                working = working.mul_by_pow_2((COMBS_S - 1) as u32);
            }

            // Gray-code phase: walk all sign patterns of the lower
            // teeth, one tooth flip per step.
            let mut j = 0usize;
            loop {
                let gray = j ^ (j >> 1);
                let idx = (((i + 1) << (COMBS_T - 1)) - 1) ^ gray;
                entries[idx] = start;

                if j >= (1 << (COMBS_T - 1)) - 1 {
                    break;
                }

                let mut delta = (j + 1) ^ ((j + 1) >> 1) ^ gray;
                let mut k = 0;
                while delta > 1 {
                    k += 1;
                    delta >>= 1;
                }

                if gray & (1 << k) != 0 {
                    start = &start + &doubles[k];
                } else {
                    start = &start - &doubles[k];
                }
                j += 1;
            }
        }

        let affine = EdwardsPoint::batch_to_affine_niels(&entries);

        let mut combs = [CombLookupTable::default(); COMBS_N];
        for (j, comb) in combs.iter_mut().enumerate() {
            comb.0
                .copy_from_slice(&affine[j << (COMBS_T - 1)..(j + 1) << (COMBS_T - 1)]);
        }

        EdwardsBasepointTable { combs }
    }

    /// Use the precomputed table to multiply the basepoint it was
    /// built for by `scalar`, in constant time.
    ///
    /// Like the other ladders, exact modulo the 4-torsion subgroup.
    pub(crate) fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        // Offset by (2^255 - 1) mod l and halve, so each comb tooth
        // bit b contributes the signed digit (2b - 1) at its position.
        let adjusted =
            Zeroizing::new((scalar + &constants::PRECOMPUTED_SCALARMUL_ADJUSTMENT).halve());
        let bytes = adjusted.as_bytes();

        let mut Q = EdwardsPoint::identity();
        for i in (0..COMBS_S).rev() {
            if i != COMBS_S - 1 {
                Q = Q.double();
            }

            for j in 0..COMBS_N {
                let mut tab = 0u8;
                for k in 0..COMBS_T {
                    let bit = i + COMBS_S * (k + j * COMBS_T);
                    if bit < 253 {
                        tab |= ((bytes[bit >> 3] >> (bit & 7)) & 1) << k;
                    }
                }

                // negate when the top tooth is clear
                let m = ((tab >> (COMBS_T - 1)) ^ 1) & 1;
                let idx = (tab ^ 0u8.wrapping_sub(m)) & 0x0f;

                let mut e = self.combs[j].select(idx);
                e.conditional_negate(Choice::from(m));
                Q = (&Q + &e).to_extended();
            }
        }

        Q
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::serial::scalar_mul::variable_base;
    use crate::backend::serial::u64::constants::ED25519_BASEPOINT_POINT;

    #[test]
    fn comb_parameters_cover_the_scalar() {
        assert!(COMBS_N * COMBS_T * COMBS_S >= 253);
    }

    #[test]
    fn matches_variable_base() {
        let B = ED25519_BASEPOINT_POINT;
        let table = EdwardsBasepointTable::create(&B);
        for &k in &[0u64, 1, 2, 8, 17, 80238420384, u64::max_value()] {
            let s = Scalar::from(k);
            assert_eq!(table.mul_base(&s), variable_base::mul(&B, &s));
        }
    }

    #[test]
    fn one_recovers_basepoint() {
        let B = ED25519_BASEPOINT_POINT;
        let table = EdwardsBasepointTable::create(&B);
        assert_eq!(table.mul_base(&Scalar::one()), B);
    }
}
