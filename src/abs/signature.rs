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

use bls12_381_plus::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Curve;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use crate::algebra::{pairing_product_is_identity, scalar_from_i64, GroupElement};
use crate::errors::Error;
use crate::utils::util::map_indices;
use super::ciphersuites::AbsCiphersuite;
use super::keys::PrivateKey;
use super::params::ParameterSet;
use super::policy::{Msp, PolicyCompiler};

const G1_LEN: usize = 48;
const G2_LEN: usize = 96;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) Y: G1Projective,
    pub(crate) W: G1Projective,
    pub(crate) S: Vec<G1Projective>,
    pub(crate) P: Vec<G2Projective>,
}

/// Why a well-formed signature failed the pairing checks.
#[derive(ThisError, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    #[error("e(W, A0) != e(Y, h0)")]
    RandomizerMismatch,
    #[error("Y is the identity of G1")]
    IdentityRandomizer,
    /// 1-based column index
    #[error("pairing equation of column {column} does not hold")]
    ColumnMismatch { column: usize },
}

/// Outcome of [`Signature::verify`].
///
/// `Malformed` covers inputs that never reached the pairing checks (the policy
/// could not be compiled, or its dimensions disagree with the signature or the
/// parameters); `Rejected` is a cryptographic rejection.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Verification {
    Valid,
    Rejected(Rejection),
    Malformed(String),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Valid => Ok(()),
            Self::Rejected(reason) => Err(Error::SignatureVerificationError(reason.to_string())),
            Self::Malformed(reason) => Err(Error::SignatureVerificationError(reason)),
        }
    }
}

impl Signature {

    /// ABS.Sign(PP, SK, m) -> σ
    ///
    /// # Description
    /// Compiles the policy for `message` over the key's own attribute list and signs it.
    /// The key is assumed to satisfy the policy; this is not checked here.
    ///
    /// # Inputs:
    /// * `params` (REQUIRED), the public parameters.
    /// * `key` (REQUIRED), the signer's private key.
    /// * `message` (REQUIRED), an octet string.
    /// * `compiler` (REQUIRED), the policy compiler shared with the verifier.
    /// * `rng` (REQUIRED), a cryptographically secure random number generator.
    pub fn sign<CS, P, R>(params: &ParameterSet<CS>, key: &PrivateKey, message: &[u8], compiler: &P, rng: &mut R) -> Result<Self, Error>
    where
        CS: AbsCiphersuite,
        P: PolicyCompiler + ?Sized,
        R: RngCore + CryptoRng,
    {
        let msp = compiler
            .compile(message, key.attributes())
            .map_err(into_policy_error)?;
        Self::sign_with_policy(params, key, &msp, rng)
    }

    /// Signs against an already compiled [`Msp`].
    pub fn sign_with_policy<CS, R>(params: &ParameterSet<CS>, key: &PrivateKey, msp: &Msp, rng: &mut R) -> Result<Self, Error>
    where
        CS: AbsCiphersuite,
        R: RngCore + CryptoRng,
    {
        check_sign_dimensions(params, key, msp)?;

        // r_0 .. r_l
        let r0 = Scalar::random(&mut *rng);
        let r: Vec<Scalar> = (0..msp.rows()).map(|_| Scalar::random(&mut *rng)).collect();

        core_sign(params, key, msp, &r0, &r)
    }

    /// ABS.Verify(PP, m, S, σ)
    ///
    /// # Description
    /// Recompiles the policy for `message` over the claimed attribute list, in the
    /// order the signer used, then checks the pairing equations in order:
    /// `e(W, A0) = e(Y, h0)`, `Y != 1`, and one equation per matrix column.
    /// Never fails: every outcome is reported through [`Verification`].
    ///
    /// # Inputs:
    /// * `params` (REQUIRED), the public parameters.
    /// * `message` (REQUIRED), an octet string.
    /// * `attributes` (REQUIRED), the ordered attribute list claimed for the signature.
    /// * `compiler` (REQUIRED), the policy compiler shared with the signer.
    pub fn verify<CS, S, P>(&self, params: &ParameterSet<CS>, message: &[u8], attributes: &[S], compiler: &P) -> Verification
    where
        CS: AbsCiphersuite,
        S: AsRef<str>,
        P: PolicyCompiler + ?Sized,
    {
        let attributes: Vec<String> = attributes.iter().map(|a| a.as_ref().to_owned()).collect();
        match compiler.compile(message, &attributes) {
            Ok(msp) => self.verify_with_policy(params, &msp),
            Err(e) => {
                log::debug!("Verify: policy compilation failed: {e}");
                Verification::Malformed(e.to_string())
            }
        }
    }

    /// Verifies against an already compiled [`Msp`].
    pub fn verify_with_policy<CS: AbsCiphersuite>(&self, params: &ParameterSet<CS>, msp: &Msp) -> Verification {
        if let Err(e) = self.check_verify_dimensions(params, msp) {
            log::debug!("Verify: {e}");
            return Verification::Malformed(e.to_string());
        }

        match core_verify(params, self, msp) {
            Ok(()) => Verification::Valid,
            Err(reason) => {
                log::debug!("Verify: {reason}");
                Verification::Rejected(reason)
            }
        }
    }

    pub fn Y(&self) -> &G1Projective {
        &self.Y
    }

    pub fn W(&self) -> &G1Projective {
        &self.W
    }

    pub fn S(&self) -> &[G1Projective] {
        &self.S
    }

    pub fn P(&self) -> &[G2Projective] {
        &self.P
    }

    /// `Y || W || I2OSP(l, 4) || S_1..S_l || I2OSP(t, 4) || P_1..P_t`, points compressed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 * G1_LEN + 8 + self.S.len() * G1_LEN + self.P.len() * G2_LEN);
        bytes.extend_from_slice(&self.Y.to_affine().to_compressed());
        bytes.extend_from_slice(&self.W.to_affine().to_compressed());
        bytes.extend_from_slice(&(self.S.len() as u32).to_be_bytes());
        self.S.iter().for_each(|s| bytes.extend_from_slice(&s.to_affine().to_compressed()));
        bytes.extend_from_slice(&(self.P.len() as u32).to_be_bytes());
        self.P.iter().for_each(|p| bytes.extend_from_slice(&p.to_affine().to_compressed()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = ByteReader { bytes, offset: 0 };

        let Y = reader.g1()?;
        let W = reader.g1()?;
        let l = reader.count()?;
        let S = (0..l).map(|_| reader.g1()).collect::<Result<Vec<_>, _>>()?;
        let t = reader.count()?;
        let P = (0..t).map(|_| reader.g2()).collect::<Result<Vec<_>, _>>()?;

        if reader.offset != bytes.len() {
            return Err(Error::DeserializationError(format!(
                "{} trailing bytes",
                bytes.len() - reader.offset
            )));
        }

        Ok(Self { Y, W, S, P })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn check_verify_dimensions<CS: AbsCiphersuite>(&self, params: &ParameterSet<CS>, msp: &Msp) -> Result<(), Error> {
        if !params.is_well_formed() {
            return Err(Error::DimensionMismatchError("inconsistent public parameters".to_owned()));
        }
        check_policy_fits(params, msp)?;
        if self.S.len() != msp.rows() || self.P.len() != msp.cols() {
            return Err(Error::DimensionMismatchError(format!(
                "signature has {} S and {} P components, policy is {}x{}",
                self.S.len(),
                self.P.len(),
                msp.rows(),
                msp.cols()
            )));
        }
        Ok(())
    }
}

fn into_policy_error(e: Error) -> Error {
    match e {
        Error::PolicyCompilationError(_) => e,
        other => Error::PolicyCompilationError(other.to_string()),
    }
}

fn check_policy_fits<CS: AbsCiphersuite>(params: &ParameterSet<CS>, msp: &Msp) -> Result<(), Error> {
    let tmax = params.tmax();
    if msp.rows() > tmax || msp.cols() > tmax {
        return Err(Error::DimensionMismatchError(format!(
            "policy is {}x{}, tmax = {tmax}",
            msp.rows(),
            msp.cols()
        )));
    }
    Ok(())
}

fn check_sign_dimensions<CS: AbsCiphersuite>(params: &ParameterSet<CS>, key: &PrivateKey, msp: &Msp) -> Result<(), Error> {
    if !params.is_well_formed() {
        return Err(Error::DimensionMismatchError("inconsistent public parameters".to_owned()));
    }
    if key.Ku.len() != key.attributes.len() {
        return Err(Error::DimensionMismatchError(format!(
            "key holds {} attribute keys for {} attributes",
            key.Ku.len(),
            key.attributes.len()
        )));
    }
    if msp.rows() != key.len() {
        return Err(Error::DimensionMismatchError(format!(
            "policy has {} rows, key has {} attributes",
            msp.rows(),
            key.len()
        )));
    }
    check_policy_fits(params, msp)
}

fn core_sign<CS: AbsCiphersuite>(params: &ParameterSet<CS>, key: &PrivateKey, msp: &Msp, r0: &Scalar, r: &[Scalar]) -> Result<Signature, Error> {
    let l = msp.rows();
    let t = msp.cols();

    let Y = key.Kbase.exp(r0);
    let W = key.K0.exp(r0);

    if Y.is_neutral() {
        return Err(Error::DegenerateElementError("Y = Kbase^r0 is the identity".to_owned()));
    }

    // C · g^mu
    let cg_mu = params.blinding_base(msp.mu());

    // S_i = Ku_i^r0 · (C · g^mu)^r_i
    let S = map_indices(l, |i| key.Ku[i].exp(r0).product(&cg_mu.exp(&r[i])));

    // P_j = Π_i (A_j · B_j^u_i)^(M_ij · r_i)
    let P = map_indices(t, |col| {
        let j = col + 1;
        (0..l)
            .filter(|&i| msp.entry(i, col) != 0)
            .map(|i| {
                let exponent = scalar_from_i64(msp.entry(i, col)) * r[i];
                params.column_base(j, &msp.u()[i]).exp(&exponent)
            })
            .fold(G2Projective::neutral(), |acc, term| acc.product(&term))
    });

    log::debug!("Sign: {l}x{t} policy, {} S and {} P components", S.len(), P.len());

    Ok(Signature { Y, W, S, P })
}

fn core_verify<CS: AbsCiphersuite>(params: &ParameterSet<CS>, signature: &Signature, msp: &Msp) -> Result<(), Rejection> {
    let l = msp.rows();
    let t = msp.cols();

    // e(W, A0) · e(Y, h0)^-1 == 1
    if !pairing_product_is_identity(&[
        (signature.W, params.A[0]),
        (signature.Y.inverse(), params.h[0]),
    ]) {
        return Err(Rejection::RandomizerMismatch);
    }

    if signature.Y.is_neutral() {
        return Err(Rejection::IdentityRandomizer);
    }

    let cg_mu = params.blinding_base(msp.mu());
    let neg_cg_mu = cg_mu.inverse();

    // Π_i e(S_i, (A_j · B_j^u_i)^M_ij) == e(C · g^mu, P_j) [· e(Y, h_1) for j = 1]
    let columns = map_indices(t, |col| {
        let j = col + 1;
        let mut terms: Vec<(G1Projective, G2Projective)> = (0..l)
            .filter(|&i| msp.entry(i, col) != 0)
            .map(|i| (signature.S[i], params.column_base(j, &msp.u()[i]).exp_i64(msp.entry(i, col))))
            .collect();
        terms.push((neg_cg_mu, signature.P[col]));
        if j == 1 {
            terms.push((signature.Y.inverse(), params.h[1]));
        }

        let holds = pairing_product_is_identity(&terms);
        log::trace!("Verify: column {j} -> {holds}");
        holds
    });

    match columns.iter().position(|holds| !holds) {
        Some(col) => Err(Rejection::ColumnMismatch { column: col + 1 }),
        None => Ok(()),
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.offset.checked_add(len).filter(|&end| end <= self.bytes.len()).ok_or_else(|| {
            Error::DeserializationError(format!("truncated input at offset {}", self.offset))
        })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn count(&mut self) -> Result<usize, Error> {
        let raw = <[u8; 4]>::try_from(self.take(4)?)
            .map_err(|_| Error::DeserializationError("invalid length prefix".to_owned()))?;
        Ok(u32::from_be_bytes(raw) as usize)
    }

    fn g1(&mut self) -> Result<G1Projective, Error> {
        let raw = <[u8; G1_LEN]>::try_from(self.take(G1_LEN)?)
            .map_err(|_| Error::DeserializationError("invalid G1 length".to_owned()))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&raw))
            .map(G1Projective::from)
            .ok_or_else(|| Error::DeserializationError("invalid G1 point".to_owned()))
    }

    fn g2(&mut self) -> Result<G2Projective, Error> {
        let raw = <[u8; G2_LEN]>::try_from(self.take(G2_LEN)?)
            .map_err(|_| Error::DeserializationError("invalid G2 length".to_owned()))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&raw))
            .map(G2Projective::from)
            .ok_or_else(|| Error::DeserializationError("invalid G2 point".to_owned()))
    }
}
