#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use num_traits::Zero;
use paillier::{Ciphertext, Decrypt, Error, HomomorphicAdd, KeyPair};
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

// Arbitrary bytes must never panic; they either decrypt to some value or are
// rejected as invalid ciphertexts.
fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let n_squared = keypair.public_key().n_squared();

    let value = BigUint::from_bytes_be(data);
    let out_of_range = value.is_zero() || &value >= n_squared;
    let ciphertext = Ciphertext::new(value);

    match keypair.decrypt(&ciphertext) {
        Ok(_) | Err(Error::PlaintextOverflow) => assert!(!out_of_range),
        Err(err) => assert_eq!(err, Error::InvalidCiphertext),
    }

    if out_of_range {
        assert_eq!(keypair.add(&ciphertext, &ciphertext), Err(Error::InvalidCiphertext));
    }
});
