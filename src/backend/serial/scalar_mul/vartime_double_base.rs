#![allow(non_snake_case)]

//! Variable-time computation of \\(aA + bB\\), where \\(B\\) is the
//! fixed basepoint.
//!
//! **This path is not constant time.**  The digit walk branches on the
//! scalars, so its timing leaks them; it exists for verification
//! equations, where both scalars are public.

use crate::constants;
use crate::edwards::{EdwardsPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the
/// basepoint.
///
/// The variable base is recoded with 3-bit-table wNAF (8 odd
/// multiples, built on the fly); the fixed base uses the 5-bit-table
/// wNAF (32 affinized odd multiples, precomputed once).
pub(crate) fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(5);
    let b_naf = b.non_adjacent_form(7);

    // Find the starting index: the most significant position where
    // either scalar has a nonzero digit.
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 || b_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
    let table_B = &*constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

    let mut r = ProjectivePoint::identity();
    loop {
        let mut t = r.double();

        if a_naf[i] > 0 {
            t = &t.to_extended() + &table_A.select(a_naf[i] as usize);
        } else if a_naf[i] < 0 {
            t = &t.to_extended() - &table_A.select(-a_naf[i] as usize);
        }

        if b_naf[i] > 0 {
            t = &t.to_extended() + &table_B.select(b_naf[i] as usize);
        } else if b_naf[i] < 0 {
            t = &t.to_extended() - &table_B.select(-b_naf[i] as usize);
        }

        r = t.to_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r.to_extended()
}
