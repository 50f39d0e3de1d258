#![allow(non_snake_case)]

//! Lookup tables of precomputed point multiples.
//!
//! `LookupTable` backs the constant-time fixed-window ladders: every
//! read sweeps the whole table with masked assignments so the access
//! pattern is independent of the index.  The `NafLookupTable` family
//! backs the variable-time wNAF path and is indexed directly.

use core::fmt::Debug;

use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::edwards::EdwardsPoint;
use crate::edwards::{AffineNielsPoint, ProjectiveNielsPoint};
use crate::traits::Identity;

/// A lookup table of the odd multiples \\(P, 3P, 5P, \ldots, 15P\\) of
/// a point \\(P\\), for the signed 4-bit fixed-window ladders.
///
/// A window digit \\(d = \pm(2k+1)\\) selects entry \\(k\\); the sign
/// is applied by the caller with a conditional Niels negation, so the
/// table itself only ever stores the positive odd multiples.
#[derive(Copy, Clone)]
pub(crate) struct LookupTable(pub(crate) [ProjectiveNielsPoint; 8]);

impl LookupTable {
    /// Given `k` in \\([0, 8)\\), return \\((2k+1)P\\) in constant time.
    pub fn select(&self, k: u8) -> ProjectiveNielsPoint {
        debug_assert!(k < 8);

        let mut t = ProjectiveNielsPoint::identity();
        for (j, entry) in self.0.iter().enumerate() {
            let c = (j as u8).ct_eq(&k);
            t.conditional_assign(entry, c);
        }

        t
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTable {
    fn from(P: &'a EdwardsPoint) -> Self {
        let P2 = P.double().to_projective_niels();
        let mut points = [P.to_projective_niels(); 8];
        let mut Pi = *P;
        for j in 0..7 {
            Pi = (&Pi + &P2).to_extended();
            points[j + 1] = Pi.to_projective_niels();
        }
        LookupTable(points)
    }
}

impl Zeroize for LookupTable {
    fn zeroize(&mut self) {
        for point in self.0.iter_mut() {
            point.zeroize();
        }
    }
}

impl Debug for LookupTable {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "LookupTable({:?})", &self.0[..])
    }
}

/// One comb of the precomputed basepoint table: the 16 sign patterns
/// of the comb's lower teeth, as affine Niels points.
///
/// Reads sweep every entry, like `LookupTable`.
#[derive(Copy, Clone)]
pub(crate) struct CombLookupTable(pub(crate) [AffineNielsPoint; 16]);

impl CombLookupTable {
    /// Given `k` in \\([0, 16)\\), return entry `k` in constant time.
    pub fn select(&self, k: u8) -> AffineNielsPoint {
        debug_assert!(k < 16);

        let mut t = AffineNielsPoint::identity();
        for (j, entry) in self.0.iter().enumerate() {
            let c = (j as u8).ct_eq(&k);
            t.conditional_assign(entry, c);
        }

        t
    }
}

impl Default for CombLookupTable {
    fn default() -> CombLookupTable {
        CombLookupTable([AffineNielsPoint::identity(); 16])
    }
}

/// A table of `EdwardsPoint` accumulators with constant-time read and
/// write, used by the dual scalar multiplication to bucket window
/// contributions without index-dependent memory access.
pub(crate) struct AccumulatorTable(pub(crate) [EdwardsPoint; 8]);

impl AccumulatorTable {
    pub fn new() -> AccumulatorTable {
        AccumulatorTable([EdwardsPoint::identity(); 8])
    }

    /// Read entry `k` in constant time.
    pub fn lookup(&self, k: u8) -> EdwardsPoint {
        debug_assert!(k < 8);

        let mut t = EdwardsPoint::identity();
        for (j, entry) in self.0.iter().enumerate() {
            t.conditional_assign(entry, (j as u8).ct_eq(&k));
        }

        t
    }

    /// Overwrite entry `k` with `point` in constant time.
    pub fn insert(&mut self, point: &EdwardsPoint, k: u8) {
        debug_assert!(k < 8);

        for (j, entry) in self.0.iter_mut().enumerate() {
            entry.conditional_assign(point, (j as u8).ct_eq(&k));
        }
    }
}

impl Zeroize for AccumulatorTable {
    fn zeroize(&mut self) {
        for point in self.0.iter_mut() {
            point.zeroize();
        }
    }
}

macro_rules! impl_naf_lookup_table {
    (Name = $name:ident, Size = $size:expr, MaxOdd = $max:expr) => {
        /// Holds an odd-multiples table for use with wNAF digits.
        ///
        /// The table is indexed directly, so it must only ever be used
        /// with public data.
        #[derive(Copy, Clone)]
        pub(crate) struct $name<T>(pub(crate) [T; $size]);

        impl<T: Copy> $name<T> {
            /// Given public odd \\( x \\) with \\( 0 < x < 2^{1 + \log_2 S} \\), return \\( xA \\).
            pub fn select(&self, x: usize) -> T {
                debug_assert_eq!(x & 1, 1);
                debug_assert!(x <= $max);

                self.0[x / 2]
            }
        }

        impl<T: Debug> Debug for $name<T> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                write!(f, "{}({:?})", stringify!($name), &self.0[..])
            }
        }

        impl<'a> From<&'a EdwardsPoint> for $name<ProjectiveNielsPoint> {
            fn from(A: &'a EdwardsPoint) -> Self {
                let mut Ai = [A.to_projective_niels(); $size];
                let A2 = A.double();
                for i in 0..($size - 1) {
                    Ai[i + 1] = (&A2 + &Ai[i]).to_extended().to_projective_niels();
                }
                // Now Ai = [A, 3A, 5A, 7A, ... ]
                $name(Ai)
            }
        }
    };
}

// used for the variable-base side of the vartime double-base multiply
impl_naf_lookup_table! {Name = NafLookupTable5, Size = 8, MaxOdd = 15}
// used for the precomputed-base side
impl_naf_lookup_table! {Name = NafLookupTable7, Size = 32, MaxOdd = 63}

impl NafLookupTable7<AffineNielsPoint> {
    /// Build the affinized odd-multiples table \\(B, 3B, \ldots, 63B\\)
    /// for a fixed basepoint, normalizing every entry with one batched
    /// inversion.
    pub fn from_basepoint(B: &EdwardsPoint) -> Self {
        let mut multiples = [*B; 32];
        let B2 = B.double();
        for i in 0..31 {
            multiples[i + 1] = (&B2 + &multiples[i].to_projective_niels()).to_extended();
        }

        let affine = EdwardsPoint::batch_to_affine_niels(&multiples);
        let mut table = [AffineNielsPoint::identity(); 32];
        table.copy_from_slice(&affine);

        NafLookupTable7(table)
    }
}
