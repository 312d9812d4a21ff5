//! Signs two messages, verifies them, and then shows how reusing a nonce
//! hands the private key to anyone holding both signatures.
//!
//! Run with `cargo run --example ecdsa_signing`.

use num_bigint::BigUint;
use weierstrass_ecc::{digest, recover_from_nonce_reuse, Curve, Parameters, SecureRng, SigningKey};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let curve = Curve::new(-3, 1, 1217u32)?;
    let mut rng = SecureRng::new();

    let params = Parameters::discover(&curve, &mut rng, 64)?;
    println!("generator {} of order {}", params.generator(), params.order());

    let key = SigningKey::random(params.clone(), &mut rng);
    let verifying_key = key.verifying_key();

    for message in ["transfer 10 coins", "transfer 20 coins"] {
        let signature = key.sign_message(&mut rng, message.as_bytes())?;
        let valid = verifying_key.verify_message(message.as_bytes(), &signature);
        println!(
            "{message:?}: ({}, {}) valid={valid}",
            signature.x(),
            signature.y()
        );
    }

    let nonce = BigUint::from(5u32);
    let m1 = digest(b"transfer 10 coins");
    let m2 = digest(b"transfer 20 coins");
    let (Some(sig1), Some(sig2)) = (
        key.try_sign_with_nonce(&nonce, &m1),
        key.try_sign_with_nonce(&nonce, &m2),
    ) else {
        println!("nonce 5 is degenerate for this generator, nothing to show");
        return Ok(());
    };

    let recovered = recover_from_nonce_reuse(params.order(), (&m1, &sig1), (&m2, &sig2))?;
    println!(
        "reused nonce {} leaks secret {} (actual {})",
        recovered.nonce,
        recovered.secret,
        key.secret()
    );

    Ok(())
}
