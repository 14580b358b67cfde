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

use core::fmt::Debug;
use core::str::FromStr;
use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Shake256;
use crate::errors::Error;

/// Binds the BLS12-381 pairing groups to a hash-to-field expander and the
/// domain separation tags shared by key issuance and policy compilation.
pub trait AbsCiphersuite: Clone + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Prefix of every domain separation tag of the suite
    const ID: &'static [u8];
    /// Identifier accepted in the configuration
    const NAME: &'static str;
    const EXPAND_LEN: usize = 48;
    type HashAlg: HashMarker;
    type Expander: for<'a> ExpandMsg<'a>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bls12381Sha256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bls12381Shake256;

impl AbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"ABS_BLS12381_XMD:SHA-256_";
    const NAME: &'static str = "BLS12-381-SHA-256";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}

impl AbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"ABS_BLS12381_XOF:SHAKE-256_";
    const NAME: &'static str = "BLS12-381-SHAKE-256";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

/// Runtime name of a ciphersuite, as found in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CiphersuiteId {
    #[serde(rename = "BLS12-381-SHA-256")]
    Bls12381Sha256,
    #[serde(rename = "BLS12-381-SHAKE-256")]
    Bls12381Shake256,
}

impl CiphersuiteId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bls12381Sha256 => Bls12381Sha256::NAME,
            Self::Bls12381Shake256 => Bls12381Shake256::NAME,
        }
    }
}

impl FromStr for CiphersuiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Bls12381Sha256, Self::Bls12381Shake256]
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| Error::ConfigurationError(format!("unknown ciphersuite {s:?}")))
    }
}
