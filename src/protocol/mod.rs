/// Elliptic-curve Diffie-Hellman key agreement.
pub mod dh;
/// ECDSA domain parameters, signing and verification.
pub mod ecdsa;
/// ElGamal encryption of curve points.
pub mod elgamal;
/// Key pairs over a base point.
pub mod key;
/// Secret recovery from reused ECDSA nonces.
pub mod nonce_reuse;

pub use dh::diffie_hellman;
pub use ecdsa::{digest, Parameters, Signature, SigningKey, VerifyingKey};
pub use elgamal::Ciphertext;
pub use key::{Key, PublicKey};
pub use nonce_reuse::{recover_from_nonce_reuse, scan_for_nonce_reuse, RecoveredKey};
