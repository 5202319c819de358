// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Decrypt, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<i64> {
        let m = self.recover(ciphertext)?;

        // Plaintexts are constrained to i64; a larger value means the sum of
        // several ciphertexts left that range.
        m.to_i64().ok_or(Error::PlaintextOverflow)
    }
}

impl PrivateKey {
    /// m = L(c^λ mod n²) · μ mod n
    fn recover(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        let public = &self.public_key;
        public.check_ciphertext(ciphertext)?;

        let c = ciphertext.value();

        // Every encryption is a unit mod n². Anything else decrypts to noise.
        if !c.gcd(&public.n).is_one() {
            return Err(Error::InvalidCiphertext);
        }

        let x = c.modpow(&self.lambda, &public.n_squared);
        let l = util::l_function(&x, &public.n).ok_or(Error::InvalidCiphertext)?;

        Ok((l * &self.mu) % &public.n)
    }
}
