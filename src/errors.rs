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

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Ciphersuite identifier unknown or not matching, or `tmax` out of range
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    /// Policy matrix, key and public parameters disagree on their dimensions
    #[error("Dimension mismatch: {0}")]
    DimensionMismatchError(String),
    /// An inversion hit zero or a randomizer collapsed to the identity
    #[error("Degenerate element: {0}")]
    DegenerateElementError(String),
    #[error("Error during policy compilation: {0}")]
    PolicyCompilationError(String),
    #[error("Error during hash to scalar computation")]
    HashToScalarError,
    #[error("Error during deserialization: {0}")]
    DeserializationError(String),
    #[error("Signature is not valid: {0}")]
    SignatureVerificationError(String),
}
