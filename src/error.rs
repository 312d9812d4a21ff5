//! Error types for the curve engine and its protocols.

/// Main error types for the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The curve modulus is not prime, is 2 or 3, or the curve is singular.
    #[error("Invalid curve parameter: {0}")]
    InvalidCurveParameter(String),

    /// Affine coordinates do not satisfy the curve equation.
    #[error("Point ({x}, {y}) is not on the curve")]
    PointNotOnCurve {
        /// Rejected x-coordinate.
        x: String,
        /// Rejected y-coordinate.
        y: String,
    },

    /// Two operands belong to curves with different `(a, b, p)` triples.
    #[error("Points are not on the same curve")]
    IncompatibleCurves,

    /// A required modular inverse does not exist.
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible {
        /// Value that was inverted.
        value: String,
        /// Modulus of the inversion.
        modulus: String,
    },

    /// Every signing attempt produced a degenerate nonce or signature component.
    #[error("Signing failed after {attempts} degenerate attempts")]
    SigningExhausted {
        /// Attempts spent before giving up.
        attempts: usize,
    },

    /// No sampled point had prime order within the attempt budget.
    #[error("No point of prime order found after {attempts} attempts")]
    NoPrimeOrderPointFound {
        /// Attempts spent before giving up.
        attempts: usize,
    },

    /// Both Diffie-Hellman parties derived different secrets.
    #[error("Key agreement mismatch: the two parties derived different points")]
    KeyAgreementMismatch,

    /// Generator, order or secret cannot serve for signatures.
    #[error("Invalid domain parameters: {0}")]
    InvalidDomainParameters(String),
}

impl Error {
    pub(crate) fn not_invertible(
        value: &num_bigint::BigUint,
        modulus: &num_bigint::BigUint,
    ) -> Self {
        Error::NotInvertible {
            value: value.to_string(),
            modulus: modulus.to_string(),
        }
    }
}
