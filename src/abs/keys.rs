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

use bls12_381_plus::G1Projective;
use group::Group;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use crate::algebra::{invert_scalar, GroupElement};
use crate::errors::Error;
use crate::utils::util::hash_attribute;
use super::ciphersuites::AbsCiphersuite;
use super::params::{MasterSecret, ParameterSet};

/// Signing key bound to an ordered attribute list.
///
/// `Ku[i]` belongs to `attributes[i]`; signing pairs it with row `i` of the
/// policy matrix, so the order is part of the key.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PrivateKey {
    pub(crate) Kbase: G1Projective,
    pub(crate) K0: G1Projective,
    pub(crate) Ku: Vec<G1Projective>,
    pub(crate) attributes: Vec<String>,
}

impl PrivateKey {

    /// ABS.KeyGen(PP, MSK, S) -> SK
    ///
    /// # Description
    /// Issues a key for the attribute list `S`. `Kbase` is drawn fresh for every call, so
    /// two keys for the same attributes share nothing.
    ///
    /// # Inputs:
    /// * `params` (REQUIRED), the public parameters.
    /// * `msk` (REQUIRED), the master secret produced together with `params`.
    /// * `attributes` (REQUIRED), the ordered attribute list.
    /// * `rng` (REQUIRED), a cryptographically secure random number generator.
    ///
    /// # Output:
    /// * `(Kbase, K0 = Kbase^(1/a0), {Ku = Kbase^(1/(a + b·H(u)))})`, or
    ///   [`Error::DegenerateElementError`] when `a0` or some `a + b·H(u)` is zero.
    pub fn generate<CS, S, R>(params: &ParameterSet<CS>, msk: &MasterSecret, attributes: &[S], rng: &mut R) -> Result<Self, Error>
    where
        CS: AbsCiphersuite,
        S: AsRef<str>,
        R: RngCore + CryptoRng,
    {
        let Kbase = G1Projective::random(&mut *rng);
        key_gen(params, msk, Kbase, attributes)
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.Ku.len()
    }

    pub fn is_empty(&self) -> bool {
        self.Ku.is_empty()
    }

    pub fn Kbase(&self) -> &G1Projective {
        &self.Kbase
    }

    pub fn K0(&self) -> &G1Projective {
        &self.K0
    }

    pub fn Ku(&self) -> &[G1Projective] {
        &self.Ku
    }
}

pub(crate) fn key_gen<CS, S>(_params: &ParameterSet<CS>, msk: &MasterSecret, Kbase: G1Projective, attributes: &[S]) -> Result<PrivateKey, Error>
where
    CS: AbsCiphersuite,
    S: AsRef<str>,
{
    // K0 = Kbase^(1/a0)
    let inv_a0 = invert_scalar(&msk.a0, "a0")?;
    let K0 = Kbase.exp(&inv_a0);

    let mut Ku = Vec::with_capacity(attributes.len());
    let mut attrs = Vec::with_capacity(attributes.len());
    for attr in attributes {
        let attr = attr.as_ref();
        let u = hash_attribute::<CS>(attr)?;

        // Ku = Kbase^(1/(a + b·u))
        let inv_a_bu = invert_scalar(&(msk.a + msk.b * u), "a + b·H(attr)")?;
        Ku.push(Kbase.exp(&inv_a_bu));
        attrs.push(attr.to_owned());

        log::trace!("KeyGen: attribute {attr:?} -> u = {}", hex::encode(u.to_be_bytes()));
    }

    log::debug!("KeyGen: issued key with {} attribute(s)", Ku.len());

    Ok(PrivateKey { Kbase, K0, Ku, attributes: attrs })
}
