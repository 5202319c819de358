// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem
//!
//! Probabilistic public-key encryption with additive homomorphism: anyone
//! holding the public key can multiply two ciphertexts and obtain an
//! encryption of the sum of their plaintexts, without learning either one.
//! Security rests on the decisional composite residuosity assumption for
//! `n = pq`.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! ## Plaintexts
//!
//! Plaintexts are `i64` values in `[0, n)`. Homomorphic sums are taken modulo
//! `n` and wrap silently once they reach it; decrypting a value that no
//! longer fits in an `i64` fails with [`Error::PlaintextOverflow`].
//!
//! ## Errors
//!
//! Entropy failures during key generation are operational errors. Malformed
//! plaintexts and ciphertexts are caller defects; both are reported through
//! [`Error`], use [`Error::is_caller_defect`] to tell them apart.
//!
//! ## Concurrency
//!
//! Keys are immutable once generated and are `Send + Sync`. Every encryption
//! draws its blinding factor from its own handle to the OS random source, so
//! keys can be shared freely between threads.
//!
//! ## Example
//!
//! ```rust,no_run
//! use paillier::{Decrypt, Encrypt, HomomorphicAdd, KeyPair};
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//! let public = keypair.public_key();
//!
//! let a = public.encrypt(10).expect("encryption failed");
//! let b = public.encrypt(20).expect("encryption failed");
//! let sum = public.add(&a, &b).expect("addition failed");
//!
//! assert_eq!(keypair.private_key().decrypt(&sum).expect("decryption failed"), 30);
//! ```

mod ciphertext;
mod crypto;
mod error;
mod keypair;
mod util;

pub use ciphertext::Ciphertext;
pub use crypto::{Decrypt, Encrypt, HomomorphicAdd};
pub use error::{Error, Result};
pub use keypair::{
    DEFAULT_KEY_BITS, KeyPair, KeyPairBuilder, MIN_KEY_BITS, MIN_SECURE_BITS, PrivateKey,
    PublicKey, generate_key,
};
pub use num_bigint_dig::BigUint;
