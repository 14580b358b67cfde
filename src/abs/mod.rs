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

//! Attribute-Based Signatures over BLS12-381, following Maji, Prabhakaran and Rosulek,
//! ["Attribute-Based Signatures"](https://eprint.iacr.org/2008/328) (CT-RSA 2011).
//!
//! A signer holding a key bound to a set of attributes signs a message such that a
//! verifier learns that the signer's attributes satisfy the access structure attached
//! to the message, and nothing about which key produced the signature.
//! - **Setup**: draws the public generators `g, h_0..h_tmax` and derives `A_j`, `B_j`, `C`
//!              from the master trapdoor `(a0, a, b, c)`.
//! - **KeyGen**: binds a fresh random `Kbase` to each attribute through `Kbase^(1/(a + b·H(u)))`.
//! - **Sign**: rerandomizes the key and spreads the randomness over the rows of the policy's
//!             monotone span program. Two signatures from the same key are unlinkable.
//! - **Verify**: recompiles the policy and checks one pairing equation per matrix column.
//!
//! The access structure is produced by a [`policy::PolicyCompiler`]; the crate ships
//! [`policy::ConjunctionCompiler`] and accepts any closure with the same signature.
//!
//! # Usage
//! ```no_run
//! use abs_pairing::abs::{ciphersuites::Bls12381Sha256, keys::PrivateKey, params::ParameterSet,
//!     policy::ConjunctionCompiler, signature::Signature};
//! use abs_pairing::config::AbsConfig;
//!
//! let mut rng = rand::thread_rng();
//! let config = AbsConfig::for_suite::<Bls12381Sha256>(3);
//! let (params, msk) = ParameterSet::<Bls12381Sha256>::setup(&config, &mut rng).unwrap();
//! let key = PrivateKey::generate(&params, &msk, &["role:admin", "dept:eng"], &mut rng).unwrap();
//!
//! let compiler = ConjunctionCompiler::<Bls12381Sha256>::new();
//! let signature = Signature::sign(&params, &key, b"approve-deploy", &compiler, &mut rng).unwrap();
//! assert!(signature.verify(&params, b"approve-deploy", &["role:admin", "dept:eng"], &compiler).is_valid());
//! ```

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for keys
pub mod keys;
/// Module for public parameters and the master secret
pub mod params;
/// Module for policies
pub mod policy;
/// Module for signatures
pub mod signature;
