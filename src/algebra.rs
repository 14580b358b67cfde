// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Multiplicative view over the BLS12-381 groups.
//!
//! `bls12_381_plus` writes G1, G2 and GT additively; the scheme is written
//! multiplicatively, so [`GroupElement`] exposes `product`, `exp` and `inverse`
//! on top of the additive operations. G1, G2, GT and [`Scalar`] stay distinct
//! types: a field element can never stand in for a group element.

use bls12_381_plus::{multi_miller_loop, G1Affine, G1Projective, G2Prepared, G2Projective, Gt, Scalar};
use group::{Curve, Group};
use crate::errors::Error;

pub trait GroupElement: Copy + PartialEq + Send + Sync {
    fn neutral() -> Self;
    fn product(&self, other: &Self) -> Self;
    fn exp(&self, exponent: &Scalar) -> Self;
    fn inverse(&self) -> Self;
    fn is_neutral(&self) -> bool;

    /// Exponentiation by a signed integer, as found in span program matrices.
    fn exp_i64(&self, exponent: i64) -> Self {
        self.exp(&scalar_from_i64(exponent))
    }
}

impl<T> GroupElement for T
where
    T: Group<Scalar = Scalar>,
{
    fn neutral() -> Self {
        T::identity()
    }

    fn product(&self, other: &Self) -> Self {
        *self + *other
    }

    fn exp(&self, exponent: &Scalar) -> Self {
        *self * *exponent
    }

    fn inverse(&self) -> Self {
        -*self
    }

    fn is_neutral(&self) -> bool {
        self.is_identity().into()
    }
}

pub fn scalar_from_i64(value: i64) -> Scalar {
    let magnitude = Scalar::from(value.unsigned_abs());
    if value < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Inverts `value`, refusing to map zero anywhere.
pub fn invert_scalar(value: &Scalar, what: &str) -> Result<Scalar, Error> {
    Option::<Scalar>::from(value.invert())
        .ok_or_else(|| Error::DegenerateElementError(format!("{what} has no inverse")))
}

/// e(P, Q)
pub fn pair(p: &G1Projective, q: &G2Projective) -> Gt {
    bls12_381_plus::pairing(&p.to_affine(), &q.to_affine())
}

/// Π e(P_k, Q_k), sharing a single final exponentiation.
pub fn pairing_product(terms: &[(G1Projective, G2Projective)]) -> Gt {
    let g1: Vec<G1Affine> = terms.iter().map(|(p, _)| p.to_affine()).collect();
    let g2: Vec<G2Prepared> = terms
        .iter()
        .map(|(_, q)| G2Prepared::from(q.to_affine()))
        .collect();
    let pairs: Vec<(&G1Affine, &G2Prepared)> = g1.iter().zip(g2.iter()).collect();

    multi_miller_loop(&pairs).final_exponentiation()
}

/// Checks Π e(P_k, Q_k) == 1 in GT.
pub fn pairing_product_is_identity(terms: &[(G1Projective, G2Projective)]) -> bool {
    pairing_product(terms).is_identity().into()
}
