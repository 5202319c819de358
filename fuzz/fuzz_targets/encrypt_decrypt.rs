#![no_main]

use libfuzzer_sys::fuzz_target;
use paillier::{Decrypt, Encrypt, Error, KeyPair};
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|value: i64| {
    let key_pair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(512).unwrap());

    match key_pair.encrypt(value) {
        Ok(ciphertext) => {
            let decrypted = key_pair.decrypt(&ciphertext).expect("valid ciphertext must decrypt");
            assert_eq!(value, decrypted);
        }
        Err(err) => {
            // A 512-bit modulus exceeds every i64, so only negatives are rejected.
            assert_eq!(err, Error::NegativePlaintext(value));
            assert!(value < 0);
        }
    }
});
