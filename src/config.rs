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

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::abs::ciphersuites::{AbsCiphersuite, CiphersuiteId};
use crate::errors::Error;

pub const ENV_TMAX: &str = "ABS_TMAX";
pub const ENV_CIPHERSUITE: &str = "ABS_CIPHERSUITE";

/// System configuration consumed by Setup.
///
/// ```json
/// { "tmax": 3, "ciphersuite": "BLS12-381-SHA-256" }
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AbsConfig {
    /// Largest supported policy dimension (rows and columns)
    pub tmax: usize,
    pub ciphersuite: String,
}

impl AbsConfig {
    pub fn new(tmax: usize, ciphersuite: CiphersuiteId) -> Self {
        Self { tmax, ciphersuite: ciphersuite.name().to_owned() }
    }

    /// Configuration bound to the ciphersuite `CS`.
    pub fn for_suite<CS: AbsCiphersuite>(tmax: usize) -> Self {
        Self { tmax, ciphersuite: CS::NAME.to_owned() }
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        serde_json::from_str(data).map_err(|e| Error::ConfigurationError(e.to_string()))
    }

    /// Reads `ABS_TMAX` and `ABS_CIPHERSUITE`.
    pub fn from_env() -> Result<Self, Error> {
        let tmax = std::env::var(ENV_TMAX)
            .map_err(|_| Error::ConfigurationError(format!("{ENV_TMAX} not set")))?;
        let tmax = tmax
            .trim()
            .parse::<usize>()
            .map_err(|e| Error::ConfigurationError(format!("{ENV_TMAX}: {e}")))?;
        let ciphersuite = std::env::var(ENV_CIPHERSUITE)
            .map_err(|_| Error::ConfigurationError(format!("{ENV_CIPHERSUITE} not set")))?;

        Ok(Self { tmax, ciphersuite })
    }

    pub fn resolve(&self) -> Result<CiphersuiteId, Error> {
        if self.tmax == 0 {
            return Err(Error::ConfigurationError("tmax must be at least 1".to_owned()));
        }
        CiphersuiteId::from_str(&self.ciphersuite)
    }

    /// Resolves the configuration and checks it names `CS`.
    pub fn resolve_for<CS: AbsCiphersuite>(&self) -> Result<(), Error> {
        let id = self.resolve()?;
        if id.name() != CS::NAME {
            return Err(Error::ConfigurationError(format!(
                "configured for {}, instantiated with {}",
                id.name(),
                CS::NAME
            )));
        }
        Ok(())
    }
}
