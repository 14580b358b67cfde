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

use core::fmt;
use core::marker::PhantomData;
use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};
use crate::algebra::GroupElement;
use crate::config::AbsConfig;
use crate::errors::Error;
use super::ciphersuites::AbsCiphersuite;

/// Public parameters. Immutable once produced by [`ParameterSet::setup`].
///
/// `h` and `A` hold `tmax + 1` elements (index 0 included), `B` holds `tmax`
/// elements: `B[k]` is the scheme's `B_{k+1}`, there is no `B_0`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ParameterSet<CS: AbsCiphersuite> {
    pub(crate) g: G1Projective,
    pub(crate) h: Vec<G2Projective>,
    pub(crate) A: Vec<G2Projective>,
    pub(crate) B: Vec<G2Projective>,
    pub(crate) C: G1Projective,
    #[serde(skip)]
    _ciphersuite: PhantomData<CS>,
}

/// Trapdoor scalars `a0, a, b, c`. Only Setup and KeyGen read them; the
/// scalars are wiped when the value is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret {
    pub(crate) a0: Scalar,
    pub(crate) a: Scalar,
    pub(crate) b: Scalar,
    pub(crate) c: Scalar,
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret { .. }")
    }
}

impl<CS: AbsCiphersuite> ParameterSet<CS> {

    /// ABS.Setup(tmax) -> (PP, MSK)
    ///
    /// # Description
    /// Draws the public generators and the master trapdoor of a new system.
    ///
    /// # Inputs:
    /// * `config` (REQUIRED), the system configuration; it must name the ciphersuite `CS`
    ///   and a `tmax` of at least 1.
    /// * `rng` (REQUIRED), a cryptographically secure random number generator.
    ///
    /// # Output:
    /// * the public parameters `(g, h_0..h_tmax, A_0..A_tmax, B_1..B_tmax, C)` and the
    ///   master secret `(a0, a, b, c)`.
    pub fn setup<R: RngCore + CryptoRng>(config: &AbsConfig, rng: &mut R) -> Result<(Self, MasterSecret), Error> {
        config.resolve_for::<CS>()?;
        let tmax = config.tmax;

        let g = G1Projective::random(&mut *rng);

        // a0, a, b, c are not checked against zero: the event has negligible probability
        let msk = MasterSecret {
            a0: Scalar::random(&mut *rng),
            a: Scalar::random(&mut *rng),
            b: Scalar::random(&mut *rng),
            c: Scalar::random(&mut *rng),
        };

        let h: Vec<G2Projective> = (0..=tmax).map(|_| G2Projective::random(&mut *rng)).collect();

        let mut A = Vec::with_capacity(tmax + 1);
        A.push(h[0].exp(&msk.a0));
        A.extend(h[1..].iter().map(|h_i| h_i.exp(&msk.a)));

        let B: Vec<G2Projective> = h[1..].iter().map(|h_i| h_i.exp(&msk.b)).collect();

        let C = g.exp(&msk.c);

        log::debug!("Setup ({}): |h| = {}, |A| = {}, |B| = {}", CS::NAME, h.len(), A.len(), B.len());

        Ok((Self { g, h, A, B, C, _ciphersuite: PhantomData }, msk))
    }

    pub fn tmax(&self) -> usize {
        self.B.len()
    }

    pub fn g(&self) -> &G1Projective {
        &self.g
    }

    pub fn h(&self) -> &[G2Projective] {
        &self.h
    }

    pub fn A(&self) -> &[G2Projective] {
        &self.A
    }

    /// `B_1..B_tmax`
    pub fn B(&self) -> &[G2Projective] {
        &self.B
    }

    pub fn C(&self) -> &G1Projective {
        &self.C
    }

    /// Table sizes agree with `tmax` (relevant for deserialized parameters).
    pub fn is_well_formed(&self) -> bool {
        let tmax = self.tmax();
        tmax >= 1 && self.h.len() == tmax + 1 && self.A.len() == tmax + 1
    }

    /// `A_j · B_j^u` for a 1-based column `j`.
    pub(crate) fn column_base(&self, j: usize, u: &Scalar) -> G2Projective {
        self.A[j].product(&self.B[j - 1].exp(u))
    }

    /// `C · g^mu`, the message-bound blinding base.
    pub(crate) fn blinding_base(&self, mu: &Scalar) -> G1Projective {
        self.C.product(&self.g.exp(mu))
    }
}
