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

mod abs_example {
    use abs_pairing::{
        abs::{
            ciphersuites::AbsCiphersuite,
            keys::PrivateKey,
            params::ParameterSet,
            policy::ConjunctionCompiler,
            signature::Signature,
        },
        config::AbsConfig,
        errors::Error,
    };

    pub(crate) fn abs_main<CS: AbsCiphersuite>(config: &AbsConfig) -> Result<(), Error> {
        const ATTRIBUTES: [&str; 2] = ["role:admin", "dept:eng"];
        const MESSAGE: &[u8] = b"approve-deploy";

        let mut rng = rand::thread_rng();

        log::info!("Setup (tmax = {})", config.tmax);
        let (params, msk) = ParameterSet::<CS>::setup(config, &mut rng)?;

        log::info!("Key Generation for {:?}", ATTRIBUTES);
        let key = PrivateKey::generate(&params, &msk, &ATTRIBUTES, &mut rng)?;

        let compiler = ConjunctionCompiler::<CS>::new();

        log::info!("Signature Computation...");
        let signature = Signature::sign(&params, &key, MESSAGE, &compiler, &mut rng)?;
        log::info!("Signature: {}", signature.encode());

        log::info!("Signature Verification...");
        signature
            .verify(&params, MESSAGE, &ATTRIBUTES, &compiler)
            .into_result()?;
        log::info!("Signature is VALID");

        let other = PrivateKey::generate(&params, &msk, &["role:admin", "dept:ops"], &mut rng)?;
        let forged = Signature::sign(&params, &other, MESSAGE, &compiler, &mut rng)?;
        match forged.verify(&params, MESSAGE, &ATTRIBUTES, &compiler).into_result() {
            Ok(()) => log::error!("Signature from dept:ops accepted for dept:eng!"),
            Err(e) => log::info!("Signature from dept:ops REJECTED: {e}"),
        }

        Ok(())
    }
}

fn main() {
    use crate::abs_example::abs_main;
    use abs_pairing::abs::ciphersuites::{Bls12381Sha256, Bls12381Shake256, CiphersuiteId};
    use abs_pairing::config::AbsConfig;
    use std::env;

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // ABS_TMAX / ABS_CIPHERSUITE, overridden by the command line
    let config = match args.len() {
        1 => AbsConfig::from_env(),
        2 => Ok(AbsConfig {
            tmax: env::var(abs_pairing::config::ENV_TMAX)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(4),
            ciphersuite: args[1].clone(),
        }),
        _ => {
            println!(
                "Usage: {} [cipher_suite]
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
                args[0]
            );
            return;
        }
    };

    let result = config.and_then(|config| {
        let suite = config.resolve()?;
        println!("\n");
        log::info!("Ciphersuite: {}", suite.name());
        match suite {
            CiphersuiteId::Bls12381Sha256 => abs_main::<Bls12381Sha256>(&config),
            CiphersuiteId::Bls12381Shake256 => abs_main::<Bls12381Shake256>(&config),
        }
    });

    if let Err(e) = result {
        log::error!("{e}");
    }
}
