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

use core::marker::PhantomData;
use bls12_381_plus::Scalar;
use serde::{Deserialize, Serialize};
use crate::errors::Error;
use crate::utils::util::{hash_attribute, hash_to_scalar, length_prefixed, message_dst};
use super::ciphersuites::AbsCiphersuite;

/// Monotone span program compiled for one (message, attribute list) pair:
/// an `l × t` integer matrix `M`, one hashed attribute `u[i]` per row and the
/// message scalar `mu`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawMsp")]
pub struct Msp {
    matrix: Vec<Vec<i64>>,
    u: Vec<Scalar>,
    mu: Scalar,
}

#[derive(Deserialize)]
struct RawMsp {
    matrix: Vec<Vec<i64>>,
    u: Vec<Scalar>,
    mu: Scalar,
}

impl TryFrom<RawMsp> for Msp {
    type Error = Error;

    fn try_from(raw: RawMsp) -> Result<Self, Self::Error> {
        Msp::new(raw.matrix, raw.u, raw.mu)
    }
}

impl Msp {
    pub fn new(matrix: Vec<Vec<i64>>, u: Vec<Scalar>, mu: Scalar) -> Result<Self, Error> {
        let cols = matrix.first().map(Vec::len).unwrap_or(0);
        if matrix.is_empty() || cols == 0 {
            return Err(Error::DimensionMismatchError("empty policy matrix".to_owned()));
        }
        if let Some(i) = matrix.iter().position(|row| row.len() != cols) {
            return Err(Error::DimensionMismatchError(format!(
                "row {i} has {} entries, expected {cols}",
                matrix[i].len()
            )));
        }
        if u.len() != matrix.len() {
            return Err(Error::DimensionMismatchError(format!(
                "{} rows but {} hashed attributes",
                matrix.len(),
                u.len()
            )));
        }
        Ok(Self { matrix, u, mu })
    }

    /// l
    pub fn rows(&self) -> usize {
        self.matrix.len()
    }

    /// t
    pub fn cols(&self) -> usize {
        self.matrix[0].len()
    }

    pub fn matrix(&self) -> &[Vec<i64>] {
        &self.matrix
    }

    /// 0-based `M[i][j]`
    pub fn entry(&self, i: usize, j: usize) -> i64 {
        self.matrix[i][j]
    }

    pub fn u(&self) -> &[Scalar] {
        &self.u
    }

    pub fn mu(&self) -> &Scalar {
        &self.mu
    }
}

/// Turns a message and an ordered attribute list into an [`Msp`].
///
/// Signing and verification call the compiler independently, so the same
/// inputs must always produce the same output.
pub trait PolicyCompiler {
    fn compile(&self, message: &[u8], attributes: &[String]) -> Result<Msp, Error>;
}

impl<F> PolicyCompiler for F
where
    F: Fn(&[u8], &[String]) -> Result<Msp, Error>,
{
    fn compile(&self, message: &[u8], attributes: &[String]) -> Result<Msp, Error> {
        self(message, attributes)
    }
}

/// Compiles the conjunction of every given attribute.
///
/// For `n` attributes the matrix is `n × n`: row 1 is `e1 + e2`, row `k` is
/// `-e_k + e_{k+1}`, row `n` is `-e_n`. The rows sum to `e1`, and no proper
/// subset of them spans it.
#[derive(Clone, Debug)]
pub struct ConjunctionCompiler<CS: AbsCiphersuite> {
    _ciphersuite: PhantomData<CS>,
}

impl<CS: AbsCiphersuite> Default for ConjunctionCompiler<CS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CS: AbsCiphersuite> ConjunctionCompiler<CS> {
    pub fn new() -> Self {
        Self { _ciphersuite: PhantomData }
    }

    pub fn conjunction_matrix(n: usize) -> Vec<Vec<i64>> {
        let mut matrix = vec![vec![0i64; n]; n];
        for (k, row) in matrix.iter_mut().enumerate() {
            if k == 0 {
                row[0] = 1;
            } else {
                row[k] = -1;
            }
            if k + 1 < n {
                row[k + 1] = 1;
            }
        }
        matrix
    }

    /// mu = H(len(msg) || msg || len(attr_1) || attr_1 || ...)
    pub fn message_scalar(message: &[u8], attributes: &[String]) -> Result<Scalar, Error> {
        let mut input = length_prefixed(message);
        attributes.iter().for_each(|a| input.extend_from_slice(&length_prefixed(a.as_bytes())));
        hash_to_scalar::<CS>(&input, &message_dst::<CS>())
    }
}

impl<CS: AbsCiphersuite> PolicyCompiler for ConjunctionCompiler<CS> {
    fn compile(&self, message: &[u8], attributes: &[String]) -> Result<Msp, Error> {
        if attributes.is_empty() {
            return Err(Error::PolicyCompilationError("no attributes to conjoin".to_owned()));
        }

        let matrix = Self::conjunction_matrix(attributes.len());
        let u = attributes
            .iter()
            .map(|a| hash_attribute::<CS>(a))
            .collect::<Result<Vec<_>, _>>()?;
        let mu = Self::message_scalar(message, attributes)?;

        Msp::new(matrix, u, mu)
    }
}
