//! Core mathematical building blocks.
//!
//! - **field**: modular arithmetic and primality testing
//! - **curve**: short Weierstrass curves and brute-force group enumeration
//! - **point**: the group law and scalar multiplication
//! - **rng**: injected randomness for ephemeral scalars

/// Short Weierstrass curve parameters.
pub mod curve;
/// Modular arithmetic primitives.
pub mod field;
/// Curve points and the group law.
pub mod point;
/// Cryptographically secure random number generation.
pub mod rng;

pub use curve::Curve;
pub use point::{Coordinates, Point};
pub use rng::SecureRng;
