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

#![allow(non_snake_case)]

#[cfg(test)]
mod abs_tests {

    use abs_pairing::abs::ciphersuites::{AbsCiphersuite, Bls12381Sha256, Bls12381Shake256, CiphersuiteId};
    use abs_pairing::abs::keys::PrivateKey;
    use abs_pairing::abs::params::ParameterSet;
    use abs_pairing::abs::policy::{ConjunctionCompiler, Msp, PolicyCompiler};
    use abs_pairing::abs::signature::{Rejection, Signature, Verification};
    use abs_pairing::config::AbsConfig;
    use abs_pairing::errors::Error;
    use abs_pairing::utils::util::hash_attribute;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn end_to_end<CS: AbsCiphersuite>() {
        init();
        let mut rng = rand::thread_rng();
        let config = AbsConfig::for_suite::<CS>(3);
        let (params, msk) = ParameterSet::<CS>::setup(&config, &mut rng).unwrap();

        let attributes = ["role:admin", "dept:eng"];
        let key = PrivateKey::generate(&params, &msk, &attributes, &mut rng).unwrap();
        let compiler = ConjunctionCompiler::<CS>::new();

        let signature = Signature::sign(&params, &key, b"approve-deploy", &compiler, &mut rng).unwrap();
        let outcome = signature.verify(&params, b"approve-deploy", &attributes, &compiler);
        assert_eq!(outcome, Verification::Valid);
        assert!(outcome.into_result().is_ok());

        // the verifier only sees the public parameters and the encoded signature
        let decoded = Signature::from_bytes(&signature.to_bytes()).unwrap();
        assert!(decoded.verify(&params, b"approve-deploy", &attributes, &compiler).is_valid());
    }

    fn unsatisfying_key<CS: AbsCiphersuite>() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<CS>::setup(&AbsConfig::for_suite::<CS>(3), &mut rng).unwrap();
        let compiler = ConjunctionCompiler::<CS>::new();

        // signer holds dept:ops, the verifier demands dept:eng
        let key = PrivateKey::generate(&params, &msk, &["role:admin", "dept:ops"], &mut rng).unwrap();
        let signature = Signature::sign(&params, &key, b"approve-deploy", &compiler, &mut rng).unwrap();

        let outcome = signature.verify(&params, b"approve-deploy", &["role:admin", "dept:eng"], &compiler);
        assert!(matches!(outcome, Verification::Rejected(Rejection::ColumnMismatch { .. })));
        assert!(matches!(outcome.into_result(), Err(Error::SignatureVerificationError(_))));
    }

    fn missing_attribute<CS: AbsCiphersuite>() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<CS>::setup(&AbsConfig::for_suite::<CS>(3), &mut rng).unwrap();
        let compiler = ConjunctionCompiler::<CS>::new();

        // the key lacks dept:eng, so the signer's policy is 1x1 against a 2x2 claim
        let key = PrivateKey::generate(&params, &msk, &["role:admin"], &mut rng).unwrap();
        let signature = Signature::sign(&params, &key, b"approve-deploy", &compiler, &mut rng).unwrap();
        assert!(signature.verify(&params, b"approve-deploy", &["role:admin"], &compiler).is_valid());

        let outcome = signature.verify(&params, b"approve-deploy", &["role:admin", "dept:eng"], &compiler);
        assert!(!outcome.is_valid());
        assert!(matches!(outcome, Verification::Malformed(_)));
        assert!(matches!(outcome.into_result(), Err(Error::SignatureVerificationError(_))));
    }

    fn single_attribute_boundary<CS: AbsCiphersuite>() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<CS>::setup(&AbsConfig::for_suite::<CS>(1), &mut rng).unwrap();
        let compiler = ConjunctionCompiler::<CS>::new();

        let key = PrivateKey::generate(&params, &msk, &["member"], &mut rng).unwrap();
        let signature = Signature::sign(&params, &key, b"hello", &compiler, &mut rng).unwrap();
        assert!(signature.verify(&params, b"hello", &["member"], &compiler).is_valid());

        let wide = PrivateKey::generate(&params, &msk, &["member", "staff"], &mut rng).unwrap();
        let err = Signature::sign(&params, &wide, b"hello", &compiler, &mut rng).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatchError(_)));
    }

    #[test]
    fn end_to_end_sha256() {
        end_to_end::<Bls12381Sha256>();
    }

    #[test]
    fn end_to_end_shake256() {
        end_to_end::<Bls12381Shake256>();
    }

    #[test]
    fn unsatisfying_key_sha256() {
        unsatisfying_key::<Bls12381Sha256>();
    }

    #[test]
    fn unsatisfying_key_shake256() {
        unsatisfying_key::<Bls12381Shake256>();
    }

    #[test]
    fn missing_attribute_sha256() {
        missing_attribute::<Bls12381Sha256>();
    }

    #[test]
    fn missing_attribute_shake256() {
        missing_attribute::<Bls12381Shake256>();
    }

    #[test]
    fn single_attribute_boundary_sha256() {
        single_attribute_boundary::<Bls12381Sha256>();
    }

    #[test]
    fn single_attribute_boundary_shake256() {
        single_attribute_boundary::<Bls12381Shake256>();
    }

    #[test]
    fn ciphersuites_do_not_cross_verify() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<Bls12381Sha256>::setup(&AbsConfig::for_suite::<Bls12381Sha256>(2), &mut rng).unwrap();
        let attributes = ["a", "b"];
        let key = PrivateKey::generate(&params, &msk, &attributes, &mut rng).unwrap();
        let signature = Signature::sign(&params, &key, b"m", &ConjunctionCompiler::<Bls12381Sha256>::new(), &mut rng).unwrap();

        // same group elements, attributes hashed under the other suite's domain
        let foreign = ConjunctionCompiler::<Bls12381Shake256>::new();
        assert!(!signature.verify(&params, b"m", &attributes, &foreign).is_valid());
    }

    #[test]
    fn configuration_from_json_drives_setup() {
        init();
        let mut rng = rand::thread_rng();
        let config = AbsConfig::from_json(r#"{ "tmax": 2, "ciphersuite": "BLS12-381-SHA-256" }"#).unwrap();
        assert_eq!(config.resolve().unwrap(), CiphersuiteId::Bls12381Sha256);

        let (params, _) = ParameterSet::<Bls12381Sha256>::setup(&config, &mut rng).unwrap();
        assert_eq!(params.tmax(), 2);

        let err = ParameterSet::<Bls12381Shake256>::setup(&config, &mut rng).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));

        let zero = AbsConfig::new(0, CiphersuiteId::Bls12381Sha256);
        let err = ParameterSet::<Bls12381Sha256>::setup(&zero, &mut rng).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn custom_compiler_as_closure() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<Bls12381Sha256>::setup(&AbsConfig::for_suite::<Bls12381Sha256>(3), &mut rng).unwrap();

        // single row (1): only the first attribute is required, the policy ignores the message
        let first_only = |_: &[u8], attributes: &[String]| -> Result<Msp, Error> {
            let first = attributes
                .first()
                .ok_or_else(|| Error::PolicyCompilationError("empty".to_owned()))?;
            let u = hash_attribute::<Bls12381Sha256>(first)?;
            Msp::new(vec![vec![1]], vec![u], bls12_381_plus::Scalar::from(7u64))
        };
        assert_eq!(first_only.compile(b"x", &["a".to_owned()]).unwrap().rows(), 1);

        let key = PrivateKey::generate(&params, &msk, &["auditor"], &mut rng).unwrap();
        let signature = Signature::sign(&params, &key, b"anything", &first_only, &mut rng).unwrap();
        assert!(signature.verify(&params, b"something else", &["auditor"], &first_only).is_valid());
        assert!(!signature.verify(&params, b"anything", &["intern"], &first_only).is_valid());
    }

    #[test]
    fn empty_key_cannot_sign_conjunction() {
        init();
        let mut rng = rand::thread_rng();
        let (params, msk) = ParameterSet::<Bls12381Sha256>::setup(&AbsConfig::for_suite::<Bls12381Sha256>(2), &mut rng).unwrap();

        let empty: [&str; 0] = [];
        let key = PrivateKey::generate(&params, &msk, &empty, &mut rng).unwrap();
        assert!(key.is_empty());

        let err = Signature::sign(&params, &key, b"m", &ConjunctionCompiler::<Bls12381Sha256>::new(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::PolicyCompilationError(_)));
    }
}
