#![allow(non_snake_case)]

//! An implementation of Ristretto, which provides a prime-order group
//! on top of the Edwards form of Curve25519.
//!
//! Ristretto is a modification of Mike Hamburg's Decaf scheme to work
//! with cofactor-\\(8\\) curves.  It quotients the curve by its
//! 4-torsion subgroup and fixes a canonical encoding for each coset,
//! so that every group element has exactly one 32-byte wire form and
//! every 32-byte string either decodes to one element or is rejected.
//! The cofactor, and the small-subgroup and malleability bugs it
//! invites, disappear behind the quotient.
//!
//! Internally, a `RistrettoPoint` is a wrapper type around
//! `EdwardsPoint`, with custom equality, compression, and
//! decompression routines to account for the quotient.  The group
//! operations are carried out with no overhead using Edwards formulas;
//! two points \\(P, Q\\) may represent the same coset in the same way
//! that two points with different \\(X,Y,Z\\) coordinates may
//! represent the same point.  Equality and encoding are therefore the
//! *only* honest observables: never compare representatives
//! coordinate-wise.

use core::borrow::Borrow;
use core::convert::TryFrom;
use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::{CryptoRng, RngCore};

use digest::generic_array::typenum::U64;
use digest::Digest;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

use crate::backend::serial::scalar_mul;
use crate::backend::serial::scalar_mul::precomputed_base::EdwardsBasepointTable;
use crate::backend::serial::u64::constants;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::Error;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::traits::ValidityCheck;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A Ristretto point, in compressed wire format.
///
/// The Ristretto encoding is canonical, so two points are equal if and
/// only if their encodings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedRistretto(pub [u8; 32]);

impl ConstantTimeEq for CompressedRistretto {
    fn ct_eq(&self, other: &CompressedRistretto) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl CompressedRistretto {
    /// Copy the bytes of this `CompressedRistretto`.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this `CompressedRistretto` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Construct a `CompressedRistretto` from a slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongLength`] if the input slice is not 32
    /// bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedRistretto, Error> {
        if bytes.len() != 32 {
            return Err(Error::WrongLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut tmp = [0u8; 32];
        tmp.copy_from_slice(bytes);

        Ok(CompressedRistretto(tmp))
    }

    /// Attempt to decompress to an `RistrettoPoint`.
    ///
    /// The identity (the all-zero string) is accepted; use
    /// [`CompressedRistretto::decompress_non_identity`] to reject it.
    ///
    /// # Return
    ///
    /// - `Some(RistrettoPoint)` if `self` was the canonical encoding of a point;
    ///
    /// - `None` if `self` was not the canonical encoding of a point.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        // Step 1. Check s for validity:
        // 1.a) s must be 32 bytes (we get this from the type system)
        // 1.b) s < p
        // 1.c) s is nonnegative
        //
        // Our decoding routine ignores the high bit, so the only
        // possible failure for 1.b) is if someone encodes s in 0..18
        // as s+p in 2^255-19..2^255-1.  We can check this by
        // converting back to bytes, and checking that we get the
        // original input, since our encoding routine is canonical.

        let s = FieldElement::from_bytes(self.as_bytes());
        let s_bytes_check = s.to_bytes();
        let s_encoding_is_canonical = s_bytes_check[..].ct_eq(&self.as_bytes()[..]);
        let s_is_negative = s.is_negative();

        if s_encoding_is_canonical.unwrap_u8() == 0u8 || s_is_negative.unwrap_u8() == 1u8 {
            return None;
        }

        // Step 2.  Compute (X:Y:Z:T).
        let one = FieldElement::one();
        let ss = s.square();
        let u1 = &one - &ss; //  1 + as²
        let u2 = &one + &ss; //  1 - as²    where a=-1
        let u2_sqr = u2.square(); // (1 - as²)²

        // v == ad(1+as²)² - (1-as²)²            where d=-121665/121666
        let v = &(&(-&constants::EDWARDS_D) * &u1.square()) - &u2_sqr;

        let (ok, I) = (&v * &u2_sqr).invsqrt(); // 1/sqrt(v*u_2²)

        let Dx = &I * &u2; // 1/sqrt(v)
        let Dy = &I * &(&Dx * &v); // 1/u2

        // x == | 2s/sqrt(v) | == + sqrt(4s²/(ad(1+as²)² - (1-as²)²))
        let mut x = &(&s + &s) * &Dx;
        let x_neg = x.is_negative();
        x.conditional_negate(x_neg);

        // y == (1-as²)/(1+as²)
        let y = &u1 * &Dy;

        // t == ((1+as²) sqrt(4s²/(ad(1+as²)² - (1-as²)²)))/(1-as²)
        let t = &x * &y;

        if ok.unwrap_u8() == 0u8
            || t.is_negative().unwrap_u8() == 1u8
            || y.is_zero().unwrap_u8() == 1u8
        {
            None
        } else {
            Some(RistrettoPoint(EdwardsPoint {
                X: x,
                Y: y,
                Z: one,
                T: t,
            }))
        }
    }

    /// Attempt to decompress to a `RistrettoPoint`, additionally
    /// rejecting the identity element.
    ///
    /// Protocols whose security depends on a peer's contribution being
    /// nontrivial (e.g. Diffie–Hellman-style exchanges) should prefer
    /// this over [`CompressedRistretto::decompress`].
    pub fn decompress_non_identity(&self) -> Option<RistrettoPoint> {
        // The identity encodes as the zero string (s = 0).
        let is_identity_encoding = self.as_bytes().ct_eq(&[0u8; 32]);
        if is_identity_encoding.unwrap_u8() == 1u8 {
            return None;
        }

        self.decompress()
    }
}

impl TryFrom<&[u8]> for CompressedRistretto {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<CompressedRistretto, Error> {
        Self::from_slice(slice)
    }
}

impl TryFrom<&[u8]> for RistrettoPoint {
    type Error = Error;

    /// Decode a group element from its canonical 32-byte encoding.
    fn try_from(slice: &[u8]) -> Result<RistrettoPoint, Error> {
        CompressedRistretto::from_slice(slice)?
            .decompress()
            .ok_or(Error::MalformedPoint)
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0u8; 32])
    }
}

impl Default for CompressedRistretto {
    fn default() -> CompressedRistretto {
        CompressedRistretto::identity()
    }
}

impl Debug for CompressedRistretto {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "CompressedRistretto: {:?}", self.as_bytes())
    }
}

impl Zeroize for CompressedRistretto {
    fn zeroize(&mut self) {
        // the zero string is also the identity encoding, so a wiped
        // value stays decodable
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A `RistrettoPoint` represents a point in the Ristretto group for
/// Curve25519.  Ristretto, a variant of Decaf, constructs a
/// prime-order group as a quotient group of a subgroup of (the
/// Edwards form of) Curve25519.
///
/// Internally, a `RistrettoPoint` is implemented as a wrapper type
/// around `EdwardsPoint`, with custom equality, compression, and
/// decompression routines to account for the quotient.  This means that
/// operations on `RistrettoPoint`s are exactly as fast as operations on
/// `EdwardsPoint`s.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    /// Compress this point using the Ristretto encoding.
    ///
    /// The output is the canonical 32-byte form: its high bit is
    /// always clear, and every representative of the same coset
    /// compresses to the same bytes.
    pub fn compress(&self) -> CompressedRistretto {
        let mut X = self.0.X;
        let mut Y = self.0.Y;
        let Z = &self.0.Z;
        let T = &self.0.T;

        let u1 = &(Z + &Y) * &(Z - &Y);
        let u2 = &X * &Y;
        // Ignore return value since this is always square
        let (_, invsqrt) = (&u1 * &u2.square()).invsqrt();
        let i1 = &invsqrt * &u1;
        let i2 = &invsqrt * &u2;
        let z_inv = &i1 * &(&i2 * T);
        let mut den_inv = i2;

        let iX = &X * &constants::SQRT_M1;
        let iY = &Y * &constants::SQRT_M1;
        let ristretto_magic = &constants::INVSQRT_A_MINUS_D;
        let enchanted_denominator = &i1 * ristretto_magic;

        let rotate = (T * &z_inv).is_negative();

        X.conditional_assign(&iY, rotate);
        Y.conditional_assign(&iX, rotate);
        den_inv.conditional_assign(&enchanted_denominator, rotate);

        Y.conditional_negate((&X * &z_inv).is_negative());

        let mut s = &den_inv * &(Z - &Y);
        let s_is_negative = s.is_negative();
        s.conditional_negate(s_is_negative);

        CompressedRistretto(s.to_bytes())
    }

    /// Check the coordinate invariants of the underlying
    /// representative.  Debugging aid; every point produced by this
    /// crate is valid by construction.
    pub fn is_valid(&self) -> bool {
        self.0.is_valid()
    }

    /// Return a `RistrettoPoint` chosen uniformly at random using a
    /// user-provided RNG.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut uniform_bytes = [0u8; 64];
        rng.fill_bytes(&mut uniform_bytes);

        RistrettoPoint::from_uniform_bytes(&uniform_bytes)
    }

    /// Hash a slice of bytes into a `RistrettoPoint`.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes of output.
    ///
    /// Convenience wrapper around `from_hash`.
    pub fn hash_from_bytes<D>(input: &[u8]) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut hash = D::default();
        hash.update(input);
        RistrettoPoint::from_hash(hash)
    }

    /// Construct a `RistrettoPoint` from an existing `Digest`
    /// instance.
    pub fn from_hash<D>(hash: D) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        // dealing with generic arrays is clumsy, until const generics land
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());

        RistrettoPoint::from_uniform_bytes(&output)
    }

    /// Map 64 bytes of hash output to a group element,
    /// indifferentiably from a random oracle.
    ///
    /// The two 32-byte halves pass through the Elligator map
    /// independently and the images are added.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> RistrettoPoint {
        let mut r_1_bytes = [0u8; 32];
        r_1_bytes.copy_from_slice(&bytes[0..32]);
        let r_1 = FieldElement::from_bytes(&r_1_bytes);
        let R_1 = RistrettoPoint::elligator_ristretto_flavor(&r_1);

        let mut r_2_bytes = [0u8; 32];
        r_2_bytes.copy_from_slice(&bytes[32..64]);
        let r_2 = FieldElement::from_bytes(&r_2_bytes);
        let R_2 = RistrettoPoint::elligator_ristretto_flavor(&r_2);

        // Applying the Elligator twice and adding the results ensures a
        // uniform distribution.
        &R_1 + &R_2
    }

    /// Map 32 bytes of hash output to a group element.
    ///
    /// The distribution of outputs is not uniform (the map is at worst
    /// 16:1), which is acceptable for protocols like SPEKE that only
    /// need a random-looking group element; anything needing oracle
    /// indifferentiability should use
    /// [`RistrettoPoint::from_uniform_bytes`].
    ///
    /// The high bit of the last input byte is ignored.
    pub fn from_hash_nonuniform(bytes: &[u8; 32]) -> RistrettoPoint {
        RistrettoPoint::elligator_ristretto_flavor(&FieldElement::from_bytes(bytes))
    }

    /// Computes the Ristretto Elligator map on a field element.
    ///
    /// The byte-oriented entry points are
    /// [`RistrettoPoint::from_hash_nonuniform`] and
    /// [`RistrettoPoint::from_uniform_bytes`]; the inverse direction
    /// is [`RistrettoPoint::invert_elligator_nonuniform`].
    pub(crate) fn elligator_ristretto_flavor(r_0: &FieldElement) -> RistrettoPoint {
        let i = &constants::SQRT_M1;
        let d = &constants::EDWARDS_D;
        let one_minus_d_sq = &constants::ONE_MINUS_EDWARDS_D_SQUARED;
        let d_minus_one_sq = &constants::EDWARDS_D_MINUS_ONE_SQUARED;
        let mut c = constants::MINUS_ONE;

        let one = FieldElement::one();

        let r = i * &r_0.square();
        let N_s = &(&r + &one) * one_minus_d_sq;
        let D = &(&c - &(d * &r)) * &(&r + d);

        let (Ns_D_is_sq, mut s) = FieldElement::sqrt_ratio_i(&N_s, &D);

        let mut s_prime = &s * r_0;
        let s_prime_is_pos = !s_prime.is_negative();
        s_prime.conditional_negate(s_prime_is_pos);

        s.conditional_assign(&s_prime, !Ns_D_is_sq);
        c.conditional_assign(&r, !Ns_D_is_sq);

        let N_t = &(&(&c * &(&r - &one)) * d_minus_one_sq) - &D;
        let s_sq = s.square();

        use crate::edwards::CompletedPoint;

        // The conversion from W_i is exactly the conversion from P1xP1.
        RistrettoPoint(
            CompletedPoint {
                X: &(&s + &s) * &D,
                Z: &N_t * &constants::SQRT_AD_MINUS_ONE,
                Y: &one - &s_sq,
                T: &one + &s_sq,
            }
            .to_extended(),
        )
    }

    /// Attempt to invert the non-uniform Elligator map: recover a
    /// 32-byte string that [`RistrettoPoint::from_hash_nonuniform`]
    /// would take back to this element.
    ///
    /// A group element has up to 16 field-element preimages, indexed
    /// by the low [`crate::constants::INVERT_ELLIGATOR_WHICH_BITS`]
    /// bits of `hint` (all higher bits are ignored):
    ///
    /// * bit 0: sign of the Jacobi-quartic `s` coordinate;
    /// * bit 1: which representative of the 2-torsion pair (swaps
    ///   `s` with `1/s`);
    /// * bit 2: sign of the recovered field element;
    /// * bit 3: rotation by the order-4 point;
    /// * bit 4: which of the two map branches to invert through.
    ///
    /// Success or failure is independent per hint, so sampling hints
    /// uniformly samples preimages uniformly.  Preimage byte strings
    /// with the (ignored) high bit set are never produced, and the
    /// identity's single preimage, the zero string, is returned for
    /// every hint.  Each candidate is re-mapped and compared in
    /// constant time before being reported, so a returned string is
    /// always a true preimage.
    pub fn invert_elligator_nonuniform(&self, hint: u32) -> CtOption<[u8; 32]> {
        let sgn_s = Choice::from((hint & 1) as u8);
        let sgn_alt = Choice::from(((hint >> 1) & 1) as u8);
        let sgn_r0 = Choice::from(((hint >> 2) & 1) as u8);
        let rotate = Choice::from(((hint >> 3) & 1) as u8);
        let inverted_branch = Choice::from(((hint >> 4) & 1) as u8);

        let one = FieldElement::one();
        let d = &constants::EDWARDS_D;

        let X = &self.0.X;
        let Y = &self.0.Y;
        let Z = &self.0.Z;
        let iX = X * &constants::SQRT_M1;
        let iY = Y * &constants::SQRT_M1;

        // s² = num/den on the chosen torsion representative: the
        // rotated representatives replace (x, y) with (iy, ix).
        let mut num = Z - Y;
        let mut den = Z + Y;
        num.conditional_assign(&(Z - &iX), rotate);
        den.conditional_assign(&(Z + &iX), rotate);

        // the representative's x-coordinate numerator (x = x_num / Z)
        let mut x_num = *X;
        x_num.conditional_assign(&iY, rotate);

        // the negated representative swaps s with 1/s and flips x
        FieldElement::conditional_swap(&mut num, &mut den, sgn_alt);
        x_num.conditional_negate(sgn_alt);

        let (_, mut s) = FieldElement::sqrt_ratio_i(&num, &den);
        s.conditional_negate(sgn_s);

        // Recover the Jacobi-quartic t coordinate,
        //   t = 2 s Z / (x sqrt(ad - 1)).
        // x_num is zero only in the identity coset, which is handled
        // separately below; invert() maps it to zero harmlessly.
        let t_denom = &x_num * &constants::SQRT_AD_MINUS_ONE;
        let t_hat = &(&(&s + &s) * Z) * &t_denom.invert();

        // Eliminating the Elligator parameter r between the map's s-
        // and t-relations leaves a linear equation in r; the two map
        // branches give reciprocal solutions.
        let u = &s.square() * &(d - &one);
        let w = &(&t_hat + &one) * &(d + &one);
        let mut r_num = &u + &w;
        let mut r_den = &u - &w;
        FieldElement::conditional_swap(&mut r_num, &mut r_den, inverted_branch);

        // r = i r0², so r0 = sqrt(-i r); fails when -i r is nonsquare.
        let minus_i_r_num = &(-&r_num) * &constants::SQRT_M1;
        let (is_sq, mut r_0) = FieldElement::sqrt_ratio_i(&minus_i_r_num, &r_den);
        r_0.conditional_negate(sgn_r0);

        // A candidate only counts if the map takes it back to this
        // element.
        let bytes = r_0.to_bytes();
        let remapped = RistrettoPoint::elligator_ristretto_flavor(&FieldElement::from_bytes(&bytes));
        let ok = is_sq & remapped.ct_eq(self);

        // The identity coset (T = 0) forgets t entirely; its one
        // preimage is the zero string.
        let is_identity_coset = self.0.T.is_zero();
        let mut out = bytes;
        for byte in out.iter_mut() {
            *byte = u8::conditional_select(byte, &0u8, is_identity_coset);
        }

        CtOption::new(out, ok | is_identity_coset)
    }

    /// Fixed-base scalar multiplication by the Ristretto generator.
    pub fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        crate::constants::RISTRETTO_BASEPOINT_TABLE.mul_base(scalar)
    }

    /// Compute \\(s\_1 A + s\_2 B\\) in constant time.
    pub fn double_scalar_mul(
        s1: &Scalar,
        A: &RistrettoPoint,
        s2: &Scalar,
        B: &RistrettoPoint,
    ) -> RistrettoPoint {
        RistrettoPoint(scalar_mul::double_base::mul(&A.0, s1, &B.0, s2))
    }

    /// Compute the pair \\((s\_1 P, s\_2 P)\\) in constant time,
    /// sharing the doublings of \\(P\\) between the two products.
    pub fn dual_scalar_mul(&self, s1: &Scalar, s2: &Scalar) -> (RistrettoPoint, RistrettoPoint) {
        let (r1, r2) = scalar_mul::dual_base::mul(&self.0, s1, s2);
        (RistrettoPoint(r1), RistrettoPoint(r2))
    }

    /// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the
    /// Ristretto generator.
    ///
    /// # Warning
    ///
    /// The running time leaks both scalars.  Use this only where they
    /// are public, such as the verification equation of a signature
    /// scheme.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &RistrettoPoint,
        b: &Scalar,
    ) -> RistrettoPoint {
        RistrettoPoint(scalar_mul::vartime_double_base::mul(a, &A.0, b))
    }

    /// Decode, multiply, and re-encode in one call.
    ///
    /// On a decoding failure with `short_circuit` set, returns
    /// immediately; otherwise the multiplication is carried out
    /// against the generator so the work done does not depend on the
    /// validity of the input, and `None` is returned at the end.
    pub fn direct_scalar_mul(
        compressed: &CompressedRistretto,
        scalar: &Scalar,
        allow_identity: bool,
        short_circuit: bool,
    ) -> Option<CompressedRistretto> {
        let decoded = if allow_identity {
            compressed.decompress()
        } else {
            compressed.decompress_non_identity()
        };

        if short_circuit && decoded.is_none() {
            return None;
        }

        let ok = decoded.is_some();
        let point = decoded.unwrap_or_else(|| {
            RistrettoPoint(constants::ED25519_BASEPOINT_POINT)
        });
        let scaled = (&point * scalar).compress();

        if ok {
            Some(scaled)
        } else {
            None
        }
    }

    /// Encode this element like EdDSA would, transporting the cofactor
    /// information: the representative is multiplied by the fixed
    /// ratio 4 and compressed in Edwards-y form.
    ///
    /// Together with the ×2 in
    /// [`RistrettoPoint::decode_like_eddsa_and_ignore_cofactor`], the
    /// round trip multiplies by the cofactor 8.
    pub fn mul_by_ratio_and_encode_like_eddsa(&self) -> CompressedEdwardsY {
        self.0.mul_by_pow_2(2).compress()
    }

    /// Decode an EdDSA-style Edwards-y encoding, ignoring the
    /// cofactor component: the decoded point is multiplied by the
    /// fixed ratio 2, which lands it in an even coset and so in the
    /// group regardless of any torsion in the input.
    pub fn decode_like_eddsa_and_ignore_cofactor(
        encoded: &CompressedEdwardsY,
    ) -> Option<RistrettoPoint> {
        encoded.decompress().map(|P| RistrettoPoint(P.double()))
    }

    /// Multiply the representative by the 4-torsion generator
    /// \\((i, 0)\\), sending \\((x, y)\\) to \\((iy, ix)\\).
    ///
    /// The result has different coordinates but is equal to `self` as
    /// a group element; this exists so tests can exercise the
    /// quotient.
    pub fn debugging_torque(&self) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint {
            X: &self.0.Y * &constants::SQRT_M1,
            Y: &self.0.X * &constants::SQRT_M1,
            Z: self.0.Z,
            T: -&self.0.T,
        })
    }

    /// Rescale the projective representative by a factor decoded from
    /// `factor` (reduced mod p; a zero factor is treated as one so the
    /// point always stays valid).
    ///
    /// Another test-suite affordance: the result is the same group
    /// element with different coordinates.
    pub fn debugging_pscale(&self, factor: &[u8; 32]) -> RistrettoPoint {
        let mut f = FieldElement::from_bytes(factor);
        f.conditional_assign(&FieldElement::one(), f.is_zero());
        RistrettoPoint(EdwardsPoint {
            X: &self.0.X * &f,
            Y: &self.0.Y * &f,
            Z: &self.0.Z * &f,
            T: &self.0.T * &f,
        })
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

impl Debug for RistrettoPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "RistrettoPoint: {:?}", self.compress())
    }
}

impl Zeroize for RistrettoPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Test equality between two `RistrettoPoint`s.
    ///
    /// Equality is modulo the 4-torsion subgroup: the first test
    /// detects agreement up to 2-torsion, and because of the *i*
    /// twist of the order-4 point, the rotated pair is caught by
    /// comparing \\(Y\_1 Y\_2\\) with \\(X\_1 X\_2\\).
    ///
    /// # Returns
    ///
    /// * `Choice(1)` if the two `RistrettoPoint`s are equal;
    /// * `Choice(0)` otherwise.
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let X1Y2 = &self.0.X * &other.0.Y;
        let Y1X2 = &self.0.Y * &other.0.X;
        let X1X2 = &self.0.X * &other.0.X;
        let Y1Y2 = &self.0.Y * &other.0.Y;

        X1Y2.ct_eq(&Y1X2) | X1X2.ct_eq(&Y1Y2)
    }
}

impl Eq for RistrettoPoint {}

// ------------------------------------------------------------------------
// Arithmetic
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

define_add_variants!(
    LHS = RistrettoPoint,
    RHS = RistrettoPoint,
    Output = RistrettoPoint
);

impl<'b> AddAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn add_assign(&mut self, _rhs: &'b RistrettoPoint) {
        *self = (self as &RistrettoPoint) + _rhs;
    }
}

define_add_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

define_sub_variants!(
    LHS = RistrettoPoint,
    RHS = RistrettoPoint,
    Output = RistrettoPoint
);

impl<'b> SubAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn sub_assign(&mut self, _rhs: &'b RistrettoPoint) {
        *self = (self as &RistrettoPoint) - _rhs;
    }
}

define_sub_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<T> Sum<T> for RistrettoPoint
where
    T: Borrow<RistrettoPoint>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(RistrettoPoint::identity(), |acc, item| acc + item.borrow())
    }
}

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

impl Neg for RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        -&self
    }
}

impl<'b> MulAssign<&'b Scalar> for RistrettoPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        let result = (self as &RistrettoPoint) * scalar;
        *self = result;
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    /// Scalar multiplication: compute `scalar * self`, in constant
    /// time.
    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(&self.0 * scalar)
    }
}

impl<'a, 'b> Mul<&'b RistrettoPoint> for &'a Scalar {
    type Output = RistrettoPoint;

    /// Scalar multiplication: compute `self * scalar`, in constant
    /// time.
    fn mul(self, point: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self * &point.0)
    }
}

define_mul_assign_variants!(LHS = RistrettoPoint, RHS = Scalar);

define_mul_variants!(LHS = RistrettoPoint, RHS = Scalar, Output = RistrettoPoint);
define_mul_variants!(LHS = Scalar, RHS = RistrettoPoint, Output = RistrettoPoint);

// ------------------------------------------------------------------------
// Constant-time conditional selection
// ------------------------------------------------------------------------

impl ConditionallySelectable for RistrettoPoint {
    /// Conditionally select between `self` and `other`.
    fn conditional_select(
        a: &RistrettoPoint,
        b: &RistrettoPoint,
        choice: Choice,
    ) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::conditional_select(&a.0, &b.0, choice))
    }
}

// ------------------------------------------------------------------------
// Precomputed tables
// ------------------------------------------------------------------------

/// A precomputed table of multiples of a basepoint, used to accelerate
/// fixed-base scalar multiplication.
///
/// A precomputed table of multiples of the Ristretto basepoint is
/// available in the `constants` module:
/// ```ignore
/// use ristretto255::constants;
/// use ristretto255::scalar::Scalar;
///
/// let a = Scalar::from(87329482u64);
/// let P = &a * &*constants::RISTRETTO_BASEPOINT_TABLE;
/// ```
#[derive(Copy, Clone)]
pub struct RistrettoBasepointTable(pub(crate) EdwardsBasepointTable);

impl RistrettoBasepointTable {
    /// Create a precomputed table of multiples of the given
    /// `basepoint`.
    pub fn create(basepoint: &RistrettoPoint) -> RistrettoBasepointTable {
        RistrettoBasepointTable(EdwardsBasepointTable::create(&basepoint.0))
    }

    /// Use the precomputed table to multiply the table's basepoint by
    /// `scalar`, in constant time.
    pub fn mul_base(&self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0.mul_base(scalar))
    }
}

impl<'a, 'b> Mul<&'b RistrettoBasepointTable> for &'a Scalar {
    type Output = RistrettoPoint;

    fn mul(self, basepoint_table: &'b RistrettoBasepointTable) -> RistrettoPoint {
        basepoint_table.mul_base(self)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoBasepointTable {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        self.mul_base(scalar)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants as public_constants;

    #[test]
    fn identity_encodes_to_zero_string() {
        assert_eq!(
            RistrettoPoint::identity().compress(),
            CompressedRistretto::identity()
        );
    }

    #[test]
    fn decompress_identity_policy() {
        let zeros = CompressedRistretto([0u8; 32]);
        assert!(zeros.decompress().is_some());
        assert!(zeros.decompress_non_identity().is_none());
        assert_eq!(zeros.decompress().unwrap(), RistrettoPoint::identity());
    }

    #[test]
    fn basepoint_roundtrip() {
        let B_bytes = public_constants::RISTRETTO_BASEPOINT_COMPRESSED;
        let B = B_bytes.decompress().unwrap();
        assert!(B.is_valid());
        assert_eq!(B.compress(), B_bytes);
        assert_eq!(B, public_constants::RISTRETTO_BASEPOINT_POINT);
    }

    #[test]
    fn torqued_representative_is_equal_and_encodes_identically() {
        let B = public_constants::RISTRETTO_BASEPOINT_POINT;
        let Q = B.debugging_torque();
        assert!(Q.is_valid());
        // the coordinates differ ...
        assert_ne!(B.0.X.to_bytes(), Q.0.X.to_bytes());
        // ... but the group element does not
        assert_eq!(B, Q);
        assert_eq!(B.compress(), Q.compress());

        // torquing four times walks back to the original coordinates
        let back = Q
            .debugging_torque()
            .debugging_torque()
            .debugging_torque();
        assert_eq!(back.compress(), B.compress());
    }

    #[test]
    fn pscaled_representative_is_equal_and_encodes_identically() {
        let B = public_constants::RISTRETTO_BASEPOINT_POINT;
        let mut factor = [0u8; 32];
        factor[0] = 5;
        let Q = B.debugging_pscale(&factor);
        assert!(Q.is_valid());
        assert_eq!(B, Q);
        assert_eq!(B.compress(), Q.compress());

        // a zero factor is treated as one
        let R = B.debugging_pscale(&[0u8; 32]);
        assert!(R.is_valid());
        assert_eq!(B.compress(), R.compress());
    }

    #[test]
    fn elligator_of_zero_is_identity() {
        let P = RistrettoPoint::from_hash_nonuniform(&[0u8; 32]);
        assert!(P.is_valid());
        assert_eq!(P, RistrettoPoint::identity());
    }

    #[test]
    fn uniform_map_is_sum_of_halves() {
        let mut bytes = [0u8; 64];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(31);
        }
        let mut lo = [0u8; 32];
        let mut hi = [0u8; 32];
        lo.copy_from_slice(&bytes[..32]);
        hi.copy_from_slice(&bytes[32..]);

        let sum = RistrettoPoint::from_hash_nonuniform(&lo)
            + RistrettoPoint::from_hash_nonuniform(&hi);
        assert_eq!(RistrettoPoint::from_uniform_bytes(&bytes), sum);
    }

    #[test]
    fn invert_elligator_roundtrips() {
        // for points built by the map, some hint must recover a true
        // preimage
        for seed in 1u8..6 {
            let mut input = [0u8; 32];
            for (i, b) in input.iter_mut().enumerate() {
                *b = seed.wrapping_mul(i as u8).wrapping_add(seed);
            }
            input[31] &= 0x7f;
            let P = RistrettoPoint::from_hash_nonuniform(&input);

            let mut recovered = None;
            for hint in 0u32..32 {
                let candidate = P.invert_elligator_nonuniform(hint);
                if bool::from(candidate.is_some()) {
                    let bytes = candidate.unwrap();
                    // every reported preimage must map back exactly
                    assert_eq!(RistrettoPoint::from_hash_nonuniform(&bytes), P);
                    recovered = Some(bytes);
                }
            }
            assert!(recovered.is_some());
        }
    }

    #[test]
    fn invert_elligator_identity_is_zero_string() {
        let id = RistrettoPoint::identity();
        let preimage = id.invert_elligator_nonuniform(0);
        assert!(bool::from(preimage.is_some()));
        assert_eq!(preimage.unwrap(), [0u8; 32]);
    }

    #[test]
    fn eddsa_encode_decode_multiplies_by_cofactor() {
        let B = public_constants::RISTRETTO_BASEPOINT_POINT;
        let eddsa = B.mul_by_ratio_and_encode_like_eddsa();
        let back = RistrettoPoint::decode_like_eddsa_and_ignore_cofactor(&eddsa).unwrap();
        let eight = Scalar::from(8u64);
        assert_eq!(back, &B * &eight);
    }

    #[test]
    fn direct_scalar_mul_matches_operators() {
        let B_bytes = public_constants::RISTRETTO_BASEPOINT_COMPRESSED;
        let s = Scalar::from(999u64);
        let direct = RistrettoPoint::direct_scalar_mul(&B_bytes, &s, true, true).unwrap();
        let expected = (&public_constants::RISTRETTO_BASEPOINT_POINT * &s).compress();
        assert_eq!(direct, expected);

        // malformed input fails both ways
        let bad = CompressedRistretto([0xff; 32]);
        assert!(RistrettoPoint::direct_scalar_mul(&bad, &s, true, true).is_none());
        assert!(RistrettoPoint::direct_scalar_mul(&bad, &s, true, false).is_none());

        // the identity is rejected when disallowed
        let zeros = CompressedRistretto([0u8; 32]);
        assert!(RistrettoPoint::direct_scalar_mul(&zeros, &s, false, true).is_none());
        assert!(RistrettoPoint::direct_scalar_mul(&zeros, &s, true, true).is_some());
    }

    #[test]
    fn from_slice_length_check() {
        assert!(CompressedRistretto::from_slice(&[0u8; 32]).is_ok());
        assert!(CompressedRistretto::from_slice(&[0u8; 31]).is_err());
    }
}
