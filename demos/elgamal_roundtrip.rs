//! Encrypts a point for a freshly generated key and decrypts it again.
//!
//! Run with `cargo run --example elgamal_roundtrip`.

use weierstrass_ecc::{elgamal, Curve, Key, SecureRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let curve = Curve::new(-3, 1, 1217u32)?;
    let base = curve.point(743, 473)?;
    let mut rng = SecureRng::new();

    let recipient = Key::random(&curve, base, &mut rng)?;
    let public = recipient.public_key();
    println!("curve:       {}", public.curve);
    println!("cardinality: {}", public.cardinality);
    println!("public key:  {}", public.q);

    let message = curve.point(1130, 1138)?;
    let ciphertext = elgamal::encrypt(&curve, &public.base, &public.q, &message, &mut rng)?;
    println!("message:     {message}");
    println!("ciphertext:  ({}, {})", ciphertext.c1(), ciphertext.c2());

    let decrypted = elgamal::decrypt(recipient.private_key(), &ciphertext)?;
    println!("decrypted:   {decrypted}");
    assert_eq!(decrypted, message);

    Ok(())
}
