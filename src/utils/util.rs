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

use bls12_381_plus::Scalar;
use elliptic_curve::hash2curve::{ExpandMsg, Expander};
use ff::Field;
use crate::abs::ciphersuites::AbsCiphersuite;
use crate::errors::Error;

/// https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-bbs-signatures-09#name-hash-to-scalar
///
/// # Description
/// Deterministically maps an octet string to a non-zero scalar. The input is expanded
/// together with a one-byte counter, which is incremented until the reduced output is non-zero.
///
/// # Inputs:
/// * `msg_octets` (REQUIRED), an octet string.
/// * `dst` (REQUIRED), an octet string representing a domain separation tag.
///
pub fn hash_to_scalar<CS: AbsCiphersuite>(msg_octets: &[u8], dst: &[u8]) -> Result<Scalar, Error> {
    let mut uniform_bytes = [0u8; 48];
    let mut counter: u8 = 0;

    loop {
        let msg_prime = [msg_octets, &[counter; 1][..]].concat();
        CS::Expander::expand_message(&[msg_prime.as_slice()], &[dst], CS::EXPAND_LEN)
            .map_err(|_| Error::HashToScalarError)?
            .fill_bytes(&mut uniform_bytes);

        let hashed_scalar = Scalar::from_okm(&uniform_bytes);
        if !bool::from(hashed_scalar.is_zero()) {
            return Ok(hashed_scalar);
        }

        counter = counter.checked_add(1).ok_or(Error::HashToScalarError)?;
    }
}

/// ID || "ATTRIBUTE_TO_SCALAR_"
pub fn attribute_dst<CS: AbsCiphersuite>() -> Vec<u8> {
    [CS::ID, b"ATTRIBUTE_TO_SCALAR_"].concat()
}

/// ID || "MESSAGE_TO_SCALAR_"
pub fn message_dst<CS: AbsCiphersuite>() -> Vec<u8> {
    [CS::ID, b"MESSAGE_TO_SCALAR_"].concat()
}

/// H(attr), the only primitive shared by key issuance and policy compilation.
pub fn hash_attribute<CS: AbsCiphersuite>(attribute: &str) -> Result<Scalar, Error> {
    hash_to_scalar::<CS>(attribute.as_bytes(), &attribute_dst::<CS>())
}

/// Big-endian length prefix, as used in the domain computations of the BBS draft.
pub fn i2osp(value: usize, len: usize) -> Vec<u8> {
    let bytes = (value as u64).to_be_bytes();
    bytes[bytes.len().saturating_sub(len)..].to_vec()
}

pub fn length_prefixed(data: &[u8]) -> Vec<u8> {
    [&i2osp(data.len(), 8)[..], data].concat()
}

/// Evaluates `f` on `0..n`, on the rayon pool when the `parallel` feature is on.
/// Output order always follows the index order.
#[cfg(feature = "parallel")]
pub(crate) fn map_indices<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    use rayon::prelude::*;
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_indices<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    map_indices_sequential(n, f)
}

#[cfg(any(test, not(feature = "parallel")))]
pub(crate) fn map_indices_sequential<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}
