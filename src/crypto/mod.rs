// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
pub(crate) mod util;

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Encrypts a single plaintext.
pub trait Encrypt {
    /// Encrypt `value` with fresh randomness.
    ///
    /// The plaintext must lie in `[0, n)`. Negative values fail with
    /// [`Error::NegativePlaintext`](crate::Error::NegativePlaintext), values
    /// at or above the modulus with
    /// [`Error::PlaintextTooLarge`](crate::Error::PlaintextTooLarge).
    fn encrypt(&self, value: i64) -> Result<Ciphertext>;
}

/// Combines ciphertexts without decrypting them.
///
/// Sums are computed modulo the public modulus `n`: a total that reaches `n`
/// wraps around and decrypts to `total - n`. This is a property of the
/// scheme, callers that need exact sums must keep them below `n`.
pub trait HomomorphicAdd: Encrypt {
    /// Produce a ciphertext of `a + b mod n` from ciphertexts of `a` and `b`.
    ///
    /// Both operands must be in `[1, n²)`, otherwise
    /// [`Error::InvalidCiphertext`](crate::Error::InvalidCiphertext).
    fn add(&self, lhs: &Ciphertext, rhs: &Ciphertext) -> Result<Ciphertext>;

    /// Add up any number of ciphertexts.
    ///
    /// The fold starts from a fresh encryption of zero, so the result is
    /// re-randomized and the empty sum is a valid ciphertext of `0`.
    fn sum<'c, I>(&self, ciphertexts: I) -> Result<Ciphertext>
    where
        I: IntoIterator<Item = &'c Ciphertext>,
    {
        ciphertexts
            .into_iter()
            .try_fold(self.encrypt(0)?, |acc, c| self.add(&acc, c))
    }
}

/// Recovers the plaintext of a ciphertext.
pub trait Decrypt {
    /// Recover `m` from `c`.
    ///
    /// Fails with [`Error::InvalidCiphertext`](crate::Error::InvalidCiphertext)
    /// for zero, values outside `[1, n²)` and values that share a factor with
    /// `n` (none of which any encryption produces), and with
    /// [`Error::PlaintextOverflow`](crate::Error::PlaintextOverflow) when `m`
    /// does not fit in an `i64`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<i64>;
}
