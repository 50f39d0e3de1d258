//! Wire-format test vectors for the ristretto255 group: the canonical
//! generator encoding, its small multiples, and the standard list of
//! byte strings that must fail to decode.

use ristretto255::constants;
use ristretto255::ristretto::{CompressedRistretto, RistrettoPoint};
use ristretto255::scalar::Scalar;
use ristretto255::traits::{Identity, IsIdentity};

fn decode_hex32(s: &str) -> [u8; 32] {
    let v = hex::decode(s).unwrap();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&v);
    bytes
}

#[test]
fn identity_encodes_as_zero_string() {
    assert_eq!(
        RistrettoPoint::identity().compress().as_bytes(),
        &decode_hex32("0000000000000000000000000000000000000000000000000000000000000000"),
    );
}

#[test]
fn generator_encoding_vector() {
    assert_eq!(
        constants::RISTRETTO_BASEPOINT_POINT.compress().as_bytes(),
        &decode_hex32("e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2d76"),
    );
}

/// The encodings of the multiples 1B, 2B, ..., 15B of the generator.
static BASEPOINT_MULTIPLES: &[&str] = &[
    "e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2d76",
    "6a493210f7499cd17fecb510ae0cea23a110e8d5b901f8acadd3095c73a3b919",
    "94741f5d5d52755ece4f23f044ee27d5d1ea1e2bd196b462166b16152a9d0259",
    "da80862773358b466ffadfe0b3293ab3d9fd53c5ea6c955358f568322daf6a57",
    "e882b131016b52c1d3337080187cf768423efccbb517bb495ab812c4160ff44e",
    "f64746d3c92b13050ed8d80236a7f0007c3b3f962f5ba793d19a601ebb1df403",
    "44f53520926ec81fbd5a387845beb7df85a96a24ece18738bdcfa6a7822a176d",
    "903293d8f2287ebe10e2374dc1a53e0bc887e592699f02d077d5263cdd55601c",
    "02622ace8f7303a31cafc63f8fc48fdc16e1c8c8d234b2f0d6685282a9076031",
    "20706fd788b2720a1ed2a5dad4952b01f413bcf0e7564de8cdc816689e2db95f",
    "bce83f8ba5dd2fa572864c24ba1810f9522bc6004afe95877ac73241cafdab42",
    "e4549ee16b9aa03099ca208c67adafcafa4c3f3e4e5303de6026e3ca8ff84460",
    "aa52e000df2e16f55fb1032fc33bc42742dad6bd5a8fc0be0167436c5948501f",
    "46376b80f409b29dc2b5f6f0c52591990896e5716f41477cd30085ab7f10301e",
    "e0c418f7c8d9c4cdd7395b93ea124f3ad99021bb681dfc3302a9d99a2e53e64e",
];

#[test]
fn small_multiples_of_the_generator() {
    let B = constants::RISTRETTO_BASEPOINT_POINT;
    let mut P = RistrettoPoint::identity();
    for expected in BASEPOINT_MULTIPLES {
        P = &P + &B;
        assert_eq!(P.compress().as_bytes(), &decode_hex32(expected));
    }
}

#[test]
fn small_multiples_via_every_scalar_mul_path() {
    let B = constants::RISTRETTO_BASEPOINT_POINT;
    for (i, expected) in BASEPOINT_MULTIPLES.iter().enumerate() {
        let k = Scalar::from((i + 1) as u64);
        let expected = decode_hex32(expected);

        // constant-time fixed window
        assert_eq!((&B * &k).compress().as_bytes(), &expected);
        // precomputed comb
        assert_eq!(RistrettoPoint::mul_base(&k).compress().as_bytes(), &expected);
        // interleaved double ladder, with the work split in two
        let half = k.halve();
        let split = RistrettoPoint::double_scalar_mul(&half, &B, &(&k - &half), &B);
        assert_eq!(split.compress().as_bytes(), &expected);
        // dual ladder
        let (r1, _r2) = B.dual_scalar_mul(&k, &Scalar::one());
        assert_eq!(r1.compress().as_bytes(), &expected);
        // vartime wNAF against the basepoint side
        let w = RistrettoPoint::vartime_double_scalar_mul_basepoint(
            &Scalar::zero(),
            &B,
            &k,
        );
        assert_eq!(w.compress().as_bytes(), &expected);
    }
}

/// Byte strings that must be rejected by the decoder: field elements
/// out of canonical range, the high bit set, "negative" s values, and
/// non-canonical representations of small values.
static BAD_ENCODINGS: &[&str] = &[
    // Non-canonical field encodings.
    "00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    "f3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    // Negative field elements.
    "0100000000000000000000000000000000000000000000000000000000000000",
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    // The high bit of byte 31 set.
    "0000000000000000000000000000000000000000000000000000000000000080",
    "e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2df6",
    // s values whose decoding has a non-square or negative invariant.
    "2a292df7e32cababbd9de088d1d1abec9fc0440f637ed2fba145094dc14bea08",
    "f4a9e534fc0d216c44b218fa0c42d99635a0127ee2e53c712f70609649fdff22",
    "8268436f8c4126196cf64b3c7ddbda90746a378625f9813dd9b8457077256731",
    "2810e5cbc2cc4d4eece54f61c6f69758e289aa7ab440b3cbeaa21995c2f4232b",
];

#[test]
fn bad_encodings_are_rejected() {
    for bad in BAD_ENCODINGS {
        let compressed = CompressedRistretto(decode_hex32(bad));
        assert!(
            compressed.decompress().is_none(),
            "{} decoded but must be rejected",
            bad
        );
    }
}

#[test]
fn try_from_surfaces_typed_errors() {
    use core::convert::TryFrom;
    use ristretto255::Error;

    let good = decode_hex32(BASEPOINT_MULTIPLES[0]);
    assert!(RistrettoPoint::try_from(&good[..]).is_ok());

    let bad = decode_hex32(BAD_ENCODINGS[0]);
    assert_eq!(
        RistrettoPoint::try_from(&bad[..]).unwrap_err(),
        Error::MalformedPoint
    );
    assert_eq!(
        RistrettoPoint::try_from(&good[..16]).unwrap_err(),
        Error::WrongLength {
            expected: 32,
            actual: 16
        }
    );

    // scalars: l itself is out of range
    let order = constants::BASEPOINT_ORDER.to_bytes();
    assert_eq!(
        Scalar::try_from(&order[..]).unwrap_err(),
        Error::MalformedScalar
    );
    let one = Scalar::one().to_bytes();
    assert_eq!(Scalar::try_from(&one[..]).unwrap(), Scalar::one());
}

#[test]
fn accepted_encodings_reencode_to_themselves() {
    for good in BASEPOINT_MULTIPLES {
        let bytes = decode_hex32(good);
        let P = CompressedRistretto(bytes).decompress().unwrap();
        assert_eq!(P.compress().as_bytes(), &bytes);
    }
}

#[test]
fn scalarmul_by_order_related_values() {
    let B = constants::RISTRETTO_BASEPOINT_POINT;

    // [l]B is the identity
    assert!((&B * &constants::BASEPOINT_ORDER).is_identity());

    // [l-1]B + B is the identity, for a decoded point too
    let P = CompressedRistretto(decode_hex32(BASEPOINT_MULTIPLES[3]))
        .decompress()
        .unwrap();
    let l_minus_one = &constants::BASEPOINT_ORDER - &Scalar::one();
    let almost = &P * &l_minus_one;
    assert!((&almost + &P).is_identity());
}

#[test]
fn elligator_of_the_zero_string_is_identity() {
    let hash = [0u8; 32];
    let P = RistrettoPoint::from_hash_nonuniform(&hash);
    assert!(P.is_identity());

    // ... and the inverse recovers a zero-string preimage
    let preimage = RistrettoPoint::identity().invert_elligator_nonuniform(0);
    assert!(bool::from(preimage.is_some()));
    let h = preimage.unwrap();
    assert!(RistrettoPoint::from_hash_nonuniform(&h).is_identity());
    assert_eq!(h, [0u8; 32]);
}

#[test]
fn torsion_equality_across_the_quotient() {
    let B = constants::RISTRETTO_BASEPOINT_POINT;
    let Q = B.debugging_torque();
    assert_eq!(B, Q);
    assert_eq!(B.compress(), Q.compress());
}

#[test]
fn hash_to_group_via_sha512() {
    use sha2::Sha512;

    let P = RistrettoPoint::hash_from_bytes::<Sha512>(b"Ristretto is traditionally a short shot of espresso");
    // determinism, validity, and agreement with the two-step form
    assert_eq!(
        P,
        RistrettoPoint::hash_from_bytes::<Sha512>(b"Ristretto is traditionally a short shot of espresso")
    );
    assert!(!P.is_identity());
    assert_eq!(P.compress(), P.debugging_torque().compress());

    use sha2::Digest;
    let digest = Sha512::digest(b"Ristretto is traditionally a short shot of espresso");
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&digest);
    assert_eq!(P, RistrettoPoint::from_uniform_bytes(&wide));
}
