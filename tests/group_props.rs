//! Property tests for the group and its codec: the axioms, the
//! consistency of the different scalar-multiplication paths, and the
//! round-trip behavior of the encodings and the Elligator maps.

use proptest::prelude::*;

use ristretto255::constants;
use ristretto255::ristretto::{CompressedRistretto, RistrettoPoint};
use ristretto255::scalar::Scalar;
use ristretto255::traits::{Identity, IsIdentity};

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    any::<[u8; 32]>().prop_map(Scalar::from_bytes_mod_order)
}

fn arb_point() -> impl Strategy<Value = RistrettoPoint> {
    // points with (possibly) torsion-bearing representatives, via the
    // uniform map and a random torque
    (any::<[u8; 32]>(), any::<[u8; 32]>(), any::<bool>()).prop_map(|(lo, hi, torque)| {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&lo);
        wide[32..].copy_from_slice(&hi);
        let p = RistrettoPoint::from_uniform_bytes(&wide);
        if torque {
            p.debugging_torque()
        } else {
            p
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn addition_commutes(p in arb_point(), q in arb_point()) {
        prop_assert_eq!(&p + &q, &q + &p);
    }

    #[test]
    fn addition_associates(p in arb_point(), q in arb_point(), r in arb_point()) {
        prop_assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
    }

    #[test]
    fn identity_and_inverses(p in arb_point()) {
        prop_assert_eq!(&p + &RistrettoPoint::identity(), p);
        prop_assert!((&p + &(-&p)).is_identity());
        prop_assert!((&p - &p).is_identity());
    }

    #[test]
    fn double_is_add_self(p in arb_point()) {
        prop_assert_eq!(&p + &p, &p * &Scalar::from(2u64));
    }

    #[test]
    fn scalar_mul_distributes_over_scalar_addition(
        p in arb_point(),
        a in arb_scalar(),
        b in arb_scalar(),
    ) {
        let lhs = &p * &(&a + &b);
        let rhs = &(&p * &a) + &(&p * &b);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_mul_edge_scalars(p in arb_point()) {
        prop_assert!((&p * &Scalar::zero()).is_identity());
        prop_assert_eq!(&p * &Scalar::one(), p);
        prop_assert!((&p * &constants::BASEPOINT_ORDER).is_identity());
    }

    #[test]
    fn all_scalar_mul_paths_agree(a in arb_scalar(), b in arb_scalar(), p in arb_point()) {
        let B = constants::RISTRETTO_BASEPOINT_POINT;

        // base comb vs variable base
        prop_assert_eq!(RistrettoPoint::mul_base(&a), &B * &a);

        // double ladder vs two singles
        let lhs = RistrettoPoint::double_scalar_mul(&a, &B, &b, &p);
        let rhs = &(&B * &a) + &(&p * &b);
        prop_assert_eq!(lhs, rhs);

        // dual ladder vs two singles
        let (r1, r2) = p.dual_scalar_mul(&a, &b);
        prop_assert_eq!(r1, &p * &a);
        prop_assert_eq!(r2, &p * &b);

        // vartime wNAF vs constant-time paths
        let w = RistrettoPoint::vartime_double_scalar_mul_basepoint(&a, &p, &b);
        prop_assert_eq!(w, &(&p * &a) + &(&B * &b));
    }

    #[test]
    fn codec_roundtrip(p in arb_point()) {
        let bytes = p.compress();
        let q = bytes.decompress().unwrap();
        prop_assert_eq!(p, q);
        prop_assert_eq!(q.compress(), bytes);
        // the canonical form always has a clear high bit
        prop_assert_eq!(bytes.as_bytes()[31] & 0x80, 0);
    }

    #[test]
    fn encodings_agree_iff_points_agree(p in arb_point(), q in arb_point()) {
        prop_assert_eq!(p == q, p.compress() == q.compress());
    }

    #[test]
    fn elligator_inverse_roundtrip(r0_bytes in any::<[u8; 32]>()) {
        use ristretto255::field::FieldElement;

        let mut input = r0_bytes;
        input[31] &= 0x7f;
        let p = RistrettoPoint::from_hash_nonuniform(&input);

        // The map only sees r0 mod p up to sign, so the recoverable
        // forms of this input are the canonical encodings of ±r0.
        let fe = FieldElement::from_bytes(&input);
        let canonical = fe.to_bytes();
        let neg_canonical = (-&fe).to_bytes();

        let mut recovered_original = false;
        for hint in 0u32..(1 << constants::INVERT_ELLIGATOR_WHICH_BITS) {
            let candidate = p.invert_elligator_nonuniform(hint);
            if bool::from(candidate.is_some()) {
                let bytes = candidate.unwrap();
                // soundness: every success is a real preimage
                prop_assert_eq!(RistrettoPoint::from_hash_nonuniform(&bytes), p);
                if bytes == canonical || bytes == neg_canonical {
                    recovered_original = true;
                }
            }
        }
        // completeness: some hint leads back to this input
        prop_assert!(recovered_original);
    }

    #[test]
    fn scalar_algebra(a in arb_scalar(), b in arb_scalar()) {
        prop_assert_eq!(&(&a + &b) - &b, a);
        prop_assert_eq!(&a * &b, &b * &a);
        prop_assert_eq!(&a.halve() + &a.halve(), a);
        if a != Scalar::zero() {
            prop_assert_eq!(&a * &a.invert(), Scalar::one());
        }
    }

    #[test]
    fn scalar_codec_roundtrip(a in arb_scalar()) {
        let bytes = a.to_bytes();
        prop_assert_eq!(Scalar::from_canonical_bytes(bytes).unwrap(), a);
        prop_assert_eq!(Scalar::from_bytes_mod_order(bytes), a);
    }
}

#[test]
fn random_points_roundtrip() {
    let mut rng = rand::thread_rng();
    for _ in 0..16 {
        let p = RistrettoPoint::random(&mut rng);
        assert_eq!(p.compress().decompress().unwrap(), p);

        let s = Scalar::random(&mut rng);
        let q = &p * &s;
        assert_eq!(q.compress().decompress().unwrap(), q);
    }
}

#[test]
fn eddsa_bridge_ratio() {
    let mut rng = rand::thread_rng();
    for _ in 0..8 {
        let p = RistrettoPoint::random(&mut rng);
        let encoded = p.mul_by_ratio_and_encode_like_eddsa();
        let decoded = RistrettoPoint::decode_like_eddsa_and_ignore_cofactor(&encoded).unwrap();
        assert_eq!(decoded, &p * &Scalar::from(8u64));

        // the encoding is insensitive to the representative
        let torqued = p.debugging_torque().mul_by_ratio_and_encode_like_eddsa();
        assert_eq!(encoded, torqued);
    }
}

#[test]
fn compressed_from_slice_validates_length() {
    assert!(CompressedRistretto::from_slice(&[0u8; 32]).is_ok());
    let err = CompressedRistretto::from_slice(&[0u8; 16]).unwrap_err();
    assert_eq!(
        err,
        ristretto255::Error::WrongLength {
            expected: 32,
            actual: 16
        }
    );
}
