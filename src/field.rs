//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! The `FieldElement` type is an alias for the backend limb
//! representation; this module layers the inversion and square-root
//! machinery on top of it.  The `sqrt_ratio_i` primitive doubles as an
//! inverse square root and a Legendre test: it is the load-bearing
//! operation of both the Ristretto codec and the Elligator map.

use core::cmp::{Eq, PartialEq};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::backend;

pub use backend::serial::u64::constants;

pub type FieldElement = backend::serial::u64::field::FieldElement51;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the
    /// internal representation is not canonical, the field elements
    /// are normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl FieldElement {
    /// Determine if this `FieldElement` is negative, in the sense
    /// used in the ed25519 paper: `x` is negative if the low bit is
    /// set.
    ///
    /// # Return
    ///
    /// If negative, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Determine if this `FieldElement` is zero.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();

        bytes.ct_eq(&zero)
    }

    /// Compute (x^(2^5-1), x^11)
    #[inline(never)]
    pub(crate) fn pow251(x: &FieldElement) -> (FieldElement, FieldElement) {
        // Temporary t_i                      Nonzero bits of e_i
        let t0 = x.square();               // 1         e_0 = 2^1
        let t1 = t0.square().square();     // 3         e_1 = 2^3
        let t2 = x * &t1;                  // 3,0       e_2 = 2^3 + 2^0
        let t3 = &t0 * &t2;                // 3,1,0
        let t4 = t3.square();              // 4,2,1
        let t5 = &t2 * &t4;                // 4,3,2,1,0

        (t5, t3)
    }

    /// Compute (x^(2^200-1), x^(2^50-1), x^11)
    #[inline(never)]
    pub(crate) fn pow22001(x: &FieldElement) -> (FieldElement, FieldElement, FieldElement) {
        let (t5, t3) = FieldElement::pow251(x);

        // Temporary t_i                      Nonzero bits of e_i
        let t6 = t5.pow2k(5);              // 9,8,7,6,5
        let t7 = &t6 * &t5;                // 9,8,7,6,5,4,3,2,1,0
        let t8 = t7.pow2k(10);             // 19..10
        let t9 = &t8 * &t7;                // 19..0
        let t10 = t9.pow2k(20);            // 39..20
        let t11 = &t10 * &t9;              // 39..0
        let t12 = t11.pow2k(10);           // 49..10
        let t13 = &t12 * &t7;              // 49..0
        let t14 = t13.pow2k(50);           // 99..50
        let t15 = &t14 * &t13;             // 99..0
        let t16 = t15.pow2k(100);          // 199..100
        let t17 = &t16 * &t15;             // 199..0

        (t17, t13, t3)
    }

    /// Compute x^(2^250-1) from (x^(2^200-1), x^(2^50-1))
    #[inline(never)]
    pub(crate) fn pow22501(t17: &FieldElement, t13: &FieldElement) -> FieldElement {
        // Temporary t_i                      Nonzero bits of e_i
        let t18 = t17.pow2k(50);           // 249..50
        let t19 = &t18 * t13;              // 249..0

        t19
    }

    /// Raise this field element to the power (p-5)/8 = 2^252 - 3.
    pub(crate) fn pow_p58(&self) -> FieldElement {
        // The bits of (p-5)/8 are 101111.....11.
        //
        //                                 nonzero bits of exponent
        let (t17, t13, _t3) = FieldElement::pow22001(self);
        let t19 = FieldElement::pow22501(&t17, &t13);
        let t20 = t19.pow2k(2);            // 251..2
        let t21 = self * &t20;             // 251..2,0

        t21
    }

    /// Compute the multiplicative inverse of this field element.
    ///
    /// Computed as x^(p-2) with a fixed addition chain, so the running
    /// time does not depend on the value.  The inverse of zero comes
    /// out as zero; callers that require a nonzero argument must check
    /// before calling.
    pub fn invert(&self) -> FieldElement {
        // The bits of p-2 = 2^255 -19 -2 are 11010111111...11.
        //
        //                                 nonzero bits of exponent
        let (t17, t13, t3) = FieldElement::pow22001(self); // t3 = x^11
        let t19 = FieldElement::pow22501(&t17, &t13);      // 249..0
        let t20 = t19.pow2k(5);                            // 254..5
        let t21 = &t20 * &t3;                              // 254..5,3,1,0

        t21
    }

    /// Given nonzero field elements, replace each by its inverse,
    /// using Montgomery's trick: one inversion plus 3(n-1)
    /// multiplications.
    ///
    /// Used to affinize whole tables of Niels points at once.  The
    /// scratch products are wiped before returning.
    pub(crate) fn batch_invert(inputs: &mut [FieldElement]) {
        use zeroize::Zeroize;

        let n = inputs.len();
        let mut scratch = vec![FieldElement::one(); n];

        // Keep an accumulator of all of the previous products
        let mut acc = FieldElement::one();

        for (input, scratch) in inputs.iter().zip(scratch.iter_mut()) {
            *scratch = acc;
            acc = &acc * input;
        }

        debug_assert!(acc.is_zero().unwrap_u8() == 0u8);

        acc = acc.invert();

        // Pass through the vector backwards to compute the inverses
        // in place
        for (input, scratch) in inputs.iter_mut().rev().zip(scratch.iter().rev()) {
            let tmp = &acc * input;
            *input = &acc * scratch;
            acc = tmp;
        }

        for e in scratch.iter_mut() {
            e.zeroize();
        }
    }

    /// Given `FieldElements` `u` and `v`, compute either `sqrt(u/v)`
    /// or `sqrt(i*u/v)` in constant time.
    ///
    /// This function always returns the nonnegative square root.
    ///
    /// # Return
    ///
    /// - `(Choice(1), +sqrt(u/v))  ` if `v` is nonzero and `u/v` is square;
    /// - `(Choice(1), zero)        ` if `u` is zero;
    /// - `(Choice(0), zero)        ` if `v` is zero and `u` is nonzero;
    /// - `(Choice(0), +sqrt(i*u/v))` if `u/v` is nonsquare (so `i*u/v` is square).
    ///
    pub fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // Using the same trick as in ed25519 decoding, we merge the
        // inversion, the square root, and the square test as follows.
        //
        // To compute sqrt(α), we can compute β = α^((p+3)/8).
        // Then β^2 = ±α, so multiplying β by sqrt(-1) if necessary
        // gives sqrt(α).
        //
        // To compute 1/sqrt(α), we observe that
        //    1/β = α^(p-1 - (p+3)/8) = α^((7p-11)/8)
        //                            = α^3 * (α^7)^((p-5)/8).
        //
        // We can therefore compute sqrt(u/v) = sqrt(u)/sqrt(v)
        // by first computing
        //    r = u^((p+3)/8) v^(p-1-(p+3)/8)
        //      = u u^((p-5)/8) v^3 (v^7)^((p-5)/8)
        //      = (uv^3) (uv^7)^((p-5)/8).
        //
        // If v is nonzero and u/v is square, then r^2 = ±u/v,
        //                                     so vr^2 = ±u.
        // If vr^2 =  u, then sqrt(u/v) = r.
        // If vr^2 = -u, then sqrt(u/v) = r*sqrt(-1).
        //
        // If v is zero, r is also zero.

        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let i = &constants::SQRT_M1;

        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&(-u));
        let flipped_sign_sqrt_i = check.ct_eq(&(&(-u) * i));

        let r_prime = &constants::SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative square root.
        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        let was_nonzero_square = correct_sign_sqrt | flipped_sign_sqrt;

        (was_nonzero_square, r)
    }

    /// Compute `1/sqrt(self)`.
    ///
    /// # Return
    ///
    /// - `(Choice(1), +sqrt(1/self))  ` if `self` is a nonzero square;
    /// - `(Choice(0), zero)           ` if `self` is zero;
    /// - `(Choice(0), +sqrt(i/self))  ` if `self` is a nonzero nonsquare;
    ///
    pub fn invsqrt(&self) -> (Choice, FieldElement) {
        FieldElement::sqrt_ratio_i(&FieldElement::one(), self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^255-19), from Sage
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68,
        0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7, 0x03,
        0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4,
        0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3, 0xa9, 0x17,
    ];

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        assert_eq!((&a * &a).to_bytes(), a.square().to_bytes());
    }

    #[test]
    fn a_square2_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let two_asq = &a.square() + &a.square();
        assert_eq!(a.square2().to_bytes(), two_asq.to_bytes());
    }

    #[test]
    fn a_invert_vs_one() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = a.invert();
        let prod = &a * &ainv;
        assert_eq!(prod.to_bytes(), FieldElement::one().to_bytes());
    }

    #[test]
    fn batch_invert_matches_nonbatched() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let mut elements = [a, a.square(), &a + &FieldElement::one(), a.square2()];
        let expected: Vec<_> = elements.iter().map(|e| e.invert().to_bytes()).collect();
        FieldElement::batch_invert(&mut elements);
        for (e, exp) in elements.iter().zip(expected.iter()) {
            assert_eq!(e.to_bytes(), *exp);
        }
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        let i = &constants::SQRT_M1;
        let minus_one = constants::MINUS_ONE;
        assert_eq!(i.square().to_bytes(), minus_one.to_bytes());
    }

    #[test]
    fn sqrt_ratio_behavior() {
        let zero = FieldElement::zero();
        let one = FieldElement::one();
        let i = constants::SQRT_M1;
        let two = &one + &one; // 2 is nonsquare mod p
        let four = &two + &two; // 4 is square mod p

        // 0/0 should return (1, 0) since u is 0
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&zero, &zero);
        assert_eq!(choice.unwrap_u8(), 1);
        assert_eq!(sqrt.to_bytes(), zero.to_bytes());
        assert_eq!(sqrt.is_negative().unwrap_u8(), 0);

        // 1/0 should return (0, 0) since v is 0, u is nonzero
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&one, &zero);
        assert_eq!(choice.unwrap_u8(), 0);
        assert_eq!(sqrt.to_bytes(), zero.to_bytes());
        assert_eq!(sqrt.is_negative().unwrap_u8(), 0);

        // 2/1 is nonsquare, so we expect (0, sqrt(i*2))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&two, &one);
        assert_eq!(choice.unwrap_u8(), 0);
        assert_eq!(sqrt.square().to_bytes(), (&two * &i).to_bytes());
        assert_eq!(sqrt.is_negative().unwrap_u8(), 0);

        // 4/1 is square, so we expect (1, sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&four, &one);
        assert_eq!(choice.unwrap_u8(), 1);
        assert_eq!(sqrt.square().to_bytes(), four.to_bytes());
        assert_eq!(sqrt.is_negative().unwrap_u8(), 0);
    }

    #[test]
    fn from_bytes_highbit_is_ignored() {
        let mut highbit_set_bytes = A_BYTES;
        highbit_set_bytes[31] |= 128u8;
        let with_highbit_set = FieldElement::from_bytes(&highbit_set_bytes);
        let without_highbit_set = FieldElement::from_bytes(&A_BYTES);
        assert_eq!(without_highbit_set.to_bytes(), with_highbit_set.to_bytes());
    }

    #[test]
    fn encoding_is_canonical() {
        // Encode 1 wrongly as 1 + (2^255 - 19) = 2^255 - 18
        let one_encoded_wrongly_bytes: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
        ];
        // Decode to a field element
        let one = FieldElement::from_bytes(&one_encoded_wrongly_bytes);
        // .. then check that the encoding is correct
        let one_bytes = one.to_bytes();
        assert_eq!(one_bytes[0], 1);
        for byte in &one_bytes[1..] {
            assert_eq!(*byte, 0);
        }
    }

    #[test]
    fn conditional_negate() {
        let one = FieldElement::one();
        let minus_one = constants::MINUS_ONE;
        let mut x = one;
        x.conditional_negate(Choice::from(1));
        assert_eq!(x.to_bytes(), minus_one.to_bytes());
        x.conditional_negate(Choice::from(0));
        assert_eq!(x.to_bytes(), minus_one.to_bytes());
        x.conditional_negate(Choice::from(1));
        assert_eq!(x.to_bytes(), one.to_bytes());
    }
}
