// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;

/// An element of the multiplicative group modulo `n²`.
///
/// Valid ciphertexts produced by [`PublicKey`](crate::PublicKey) lie in
/// `[1, n²)`. Any `BigUint` can be wrapped; keys validate the value when it is
/// used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl From<Ciphertext> for BigUint {
    fn from(ciphertext: Ciphertext) -> Self {
        ciphertext.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_unwraps_value() {
        let val = BigUint::from(0xDEADBEEFu64);
        let c = Ciphertext::from(val.clone());

        assert_eq!(c.value(), &val);
        assert_eq!(c.bits(), 32);
        assert_eq!(BigUint::from(c), val);
    }
}
