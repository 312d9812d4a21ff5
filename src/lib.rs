//! # Weierstrass ECC
//!
//! Group arithmetic on short Weierstrass curves `y^2 = x^3 + ax + b (mod p)`
//! with arbitrary-precision integers, plus three classical protocols built
//! on it: Diffie-Hellman, ElGamal and ECDSA.
//!
//! This crate is meant for small demonstration curves. Cardinality, point
//! order and generator search are brute force, and nothing here is constant
//! time.
//!
//! ## Example
//!
//! ```rust
//! use weierstrass_ecc::{Curve, Parameters, SecureRng, SigningKey};
//!
//! let curve = Curve::new(-3, 1, 1217u32).unwrap();
//! let base = curve.point(1202, 825).unwrap();
//! let params = Parameters::new(base, 1259u32.into()).unwrap();
//!
//! let mut rng = SecureRng::new();
//! let key = SigningKey::random(params, &mut rng);
//! let signature = key.sign_message(&mut rng, b"attack at dawn").unwrap();
//!
//! assert!(key.verifying_key().verify_message(b"attack at dawn", &signature));
//! ```

#![warn(missing_docs)]

/// Runtime configuration for the command-line front end.
#[cfg(feature = "cli")]
pub mod config;
/// Error types.
pub mod error;
/// Field arithmetic, curves, points and randomness.
pub mod primitives;
/// Key agreement, encryption and signatures.
pub mod protocol;

pub use error::Error;
pub use primitives::{Coordinates, Curve, Point, SecureRng};
pub use protocol::elgamal;
pub use protocol::{
    diffie_hellman, digest, recover_from_nonce_reuse, scan_for_nonce_reuse, Ciphertext, Key,
    Parameters, PublicKey, RecoveredKey, Signature, SigningKey, VerifyingKey,
};

/// Result type for library operations.
pub type Result<T> = core::result::Result<T, Error>;
