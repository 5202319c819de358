// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Encrypt, HomomorphicAdd};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::trace;

impl Encrypt for PublicKey {
    fn encrypt(&self, value: i64) -> Result<Ciphertext> {
        self.encrypt_with_rng(value, &mut OsRng)
    }
}

impl HomomorphicAdd for PublicKey {
    fn add(&self, lhs: &Ciphertext, rhs: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(lhs)?;
        self.check_ciphertext(rhs)?;

        // E(a) · E(b) mod n² = E(a + b mod n)
        let c = (lhs.value() * rhs.value()) % &self.n_squared;

        Ok(Ciphertext::new(c))
    }
}

impl PublicKey {
    /// Encrypt `value`, drawing the blinding factor from `rng`.
    ///
    /// [`Encrypt::encrypt`] calls this with the operating system's CSPRNG.
    /// `rng` must be unpredictable and must never replay its output: two
    /// encryptions sharing a blinding factor reveal whether their plaintexts
    /// are equal.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        value: i64,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let m = self.plaintext(value)?;
        let r = self.blinding_factor(rng);

        // c = g^m · r^n mod n²
        let gm = self.g.modpow(&m, &self.n_squared);
        let rn = r.modpow(&self.n, &self.n_squared);
        let c = (gm * rn) % &self.n_squared;

        Ok(Ciphertext::new(c))
    }

    /// Map a signed plaintext into `[0, n)`.
    fn plaintext(&self, value: i64) -> Result<BigUint> {
        let m = u64::try_from(value)
            .map(BigUint::from)
            .map_err(|_| Error::NegativePlaintext(value))?;

        if m >= self.n {
            return Err(Error::PlaintextTooLarge);
        }

        Ok(m)
    }

    /// Draw `r` uniformly from `[0, n)` until `gcd(r, n) = 1`.
    ///
    /// Only multiples of `p` or `q` are rejected, so a redraw is rare for
    /// any realistic modulus.
    fn blinding_factor<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        let mut draws = 0usize;

        loop {
            draws += 1;
            let r = rng.gen_biguint_below(&self.n);

            if r.gcd(&self.n).is_one() {
                if draws > 1 {
                    trace!(draws, "redrew blinding factor");
                }
                return r;
            }
        }
    }

    /// Reject ciphertexts outside `[1, n²)`.
    pub(crate) fn check_ciphertext(&self, ciphertext: &Ciphertext) -> Result<()> {
        let c = ciphertext.value();
        if c.is_zero() || c >= &self.n_squared {
            return Err(Error::InvalidCiphertext);
        }

        Ok(())
    }
}
