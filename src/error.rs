// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
///
/// Variants fall into two groups. Operational failures (the entropy source
/// failed, key generation could not finish) can happen with correct input.
/// Everything else reports a caller defect: a malformed plaintext, ciphertext
/// or parameter that correct code never passes. See [`Error::is_caller_defect`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    /// Raised by prime generation itself. [`crate::generate_key`] validates
    /// the key size first and reports [`Error::InvalidKeySize`] instead.
    #[error("Prime bit length too short: {0}")]
    BitLengthTooShort(usize),

    #[error("Plaintext must be non-negative, got {0}")]
    NegativePlaintext(i64),

    #[error("Plaintext exceeds maximum allowed value")]
    PlaintextTooLarge,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Decrypted value does not fit in a 64-bit signed integer")]
    PlaintextOverflow,

    #[error("Entropy source failure: {0}")]
    Entropy(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}

impl Error {
    /// Returns `true` when the error was caused by invalid input from the
    /// caller rather than by a failure of the environment.
    pub fn is_caller_defect(&self) -> bool {
        !matches!(self, Error::Entropy(_) | Error::KeyGenerationFailed(_))
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::Entropy(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
