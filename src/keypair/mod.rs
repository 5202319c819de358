// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

use std::sync::Arc;

use crate::ciphertext::Ciphertext;
use crate::crypto::{self, Decrypt, Encrypt, HomomorphicAdd};
use crate::error::{Error, Result};
use crate::util::prime;

use num_bigint_dig::BigUint;
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest modulus size accepted by [`generate_key`].
pub const MIN_KEY_BITS: usize = 8;

/// Minimum recommended modulus size for production use.
pub const MIN_SECURE_BITS: usize = 2048;

/// Modulus size used by [`KeyPair::generate`] and [`KeyPairBuilder::new`].
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Public parameters of the cryptosystem.
///
/// The modulus is `n = pq` for two distinct primes of equal size. The
/// generator is fixed to `g = n + 1` and `n²` is cached at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
}

impl PublicKey {
    pub(crate) fn from_modulus(n: BigUint) -> Self {
        let g = &n + BigUint::one();
        let n_squared = &n * &n;

        Self { n, g, n_squared }
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the generator `g = n + 1`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return the ciphertext modulus `n²`.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return the bit length of the modulus.
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// Secret key material.
///
/// Holds the decryption trapdoor `λ = lcm(p-1, q-1)` and the precomputed
/// `μ = L(g^λ mod n²)⁻¹ mod n`. The public key is shared, never copied.
/// Sensitive fields are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: Arc<PublicKey>,
    pub(crate) lambda: BigUint,
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Build the private half for `public_key` from the trapdoor `lambda`.
    ///
    /// Fails if `L(g^λ mod n²)` has no inverse modulo `n`, which cannot happen
    /// for a modulus accepted by [`generate_key`].
    pub(crate) fn new(public_key: Arc<PublicKey>, lambda: BigUint) -> Result<Self> {
        let x = public_key.g.modpow(&lambda, &public_key.n_squared);
        let mu = crypto::util::l_function(&x, &public_key.n)
            .and_then(|l| crypto::util::mod_inverse(&l, &public_key.n))
            .ok_or_else(|| Error::KeyGenerationFailed("L(g^lambda) is not invertible mod n".into()))?;

        Ok(Self { public_key, lambda, mu })
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Return a shared handle to the associated public key.
    pub fn shared_public_key(&self) -> Arc<PublicKey> {
        Arc::clone(&self.public_key)
    }

    /// Return the trapdoor exponent `λ`.
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    /// Return the precomputed decryption factor `μ`.
    pub fn mu(&self) -> &BigUint {
        &self.mu
    }
}

/// Generate a Paillier private key (and its public key) with a `bits`-bit
/// modulus, drawing both primes from `rng`.
///
/// Each prime has `bits / 2` bits with its two top bits set, so `n` has
/// exactly `bits` bits for even `bits`. An odd request yields `bits - 1`
/// since both factors keep the same length.
///
/// The pair is redrawn when the primes are equal or when
/// `gcd(n, (p-1)(q-1)) != 1`; this loop has no fixed bound but almost always
/// ends after the first draw.
///
/// # Errors
///
/// - [`Error::InvalidKeySize`] if `bits < MIN_KEY_BITS`.
/// - [`Error::Entropy`] as soon as `rng` fails; no partial key is returned.
pub fn generate_key<R: RngCore + CryptoRng>(rng: &mut R, bits: usize) -> Result<PrivateKey> {
    if bits < MIN_KEY_BITS {
        return Err(Error::InvalidKeySize { min: MIN_KEY_BITS, actual: bits });
    }

    let prime_bits = bits / 2;
    let mut redraws = 0usize;

    let (p, q, n) = loop {
        let p = prime::random_prime(prime_bits, rng)?;
        let q = prime::random_prime(prime_bits, rng)?;

        if let Some(n) = util::usable_modulus(&p, &q) {
            break (p, q, n);
        }
        redraws += 1;
    };

    debug!(bits, redraws, "generated Paillier prime pair");

    let one = BigUint::one();
    let lambda = util::lcm(&(&p - &one), &(&q - &one));

    let public_key = Arc::new(PublicKey::from_modulus(n));
    PrivateKey::new(public_key, lambda)
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: Arc<PublicKey>,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return a shared handle to the public key.
    pub fn shared_public_key(&self) -> Arc<PublicKey> {
        Arc::clone(&self.public)
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(secret: PrivateKey) -> Self {
        Self { public: secret.shared_public_key(), secret }
    }
}

impl Encrypt for KeyPair {
    fn encrypt(&self, value: i64) -> Result<Ciphertext> {
        self.public.encrypt(value)
    }
}

impl HomomorphicAdd for KeyPair {
    fn add(&self, lhs: &Ciphertext, rhs: &Ciphertext) -> Result<Ciphertext> {
        self.public.add(lhs, rhs)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<i64> {
        self.secret.decrypt(ciphertext)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug)]
pub struct KeyPairBuilder {
    bit_length: usize,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self { bit_length: DEFAULT_KEY_BITS }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Generate the key pair using the operating system's CSPRNG.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair drawing primes from `rng`.
    pub fn build_with_rng<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<KeyPair> {
        let keypair = KeyPair::from(generate_key(rng, self.bit_length)?);

        let bits = keypair.public_key().bit_length();
        if bits < MIN_SECURE_BITS {
            warn!(
                bits,
                requested = self.bit_length,
                recommended = MIN_SECURE_BITS,
                "generated a cryptographically weak Paillier key"
            );
        }

        Ok(keypair)
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::test_util::FailingRng;

    use num_integer::Integer;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn keygen_structure() {
        let secret = generate_key(&mut OsRng, 256).unwrap();
        let public = secret.public_key();
        let n = public.n();

        assert!(n.is_odd());
        assert_eq!(public.bit_length(), 256);
        assert_eq!(public.g(), &(n + BigUint::one()));
        assert_eq!(public.n_squared(), &(n * n));

        // μ is the inverse of λ mod n when g = n + 1.
        assert_eq!((secret.lambda() * secret.mu()) % n, BigUint::one());
        assert!(!secret.mu().is_zero());
    }

    #[test]
    fn modulus_has_requested_size() {
        for seed in 0..24 {
            let secret = generate_key(&mut StdRng::seed_from_u64(seed), 256).unwrap();
            assert_eq!(secret.public_key().bit_length(), 256, "seed {}", seed);
        }

        for bits in (MIN_KEY_BITS..=40).step_by(2) {
            let secret = generate_key(&mut OsRng, bits).unwrap();
            assert_eq!(secret.public_key().bit_length(), bits);
        }
    }

    #[test]
    fn odd_size_rounds_down_to_equal_primes() {
        let secret = generate_key(&mut OsRng, 11).unwrap();
        assert_eq!(secret.public_key().bit_length(), 10);

        let secret = generate_key(&mut OsRng, 129).unwrap();
        assert_eq!(secret.public_key().bit_length(), 128);
    }

    #[test]
    fn lambda_divides_phi() {
        let secret = generate_key(&mut OsRng, 128).unwrap();
        let n = secret.public_key().n();

        // Any unit raised to λ is 1 mod n.
        let unit = BigUint::from(2u32);
        assert_eq!(unit.modpow(secret.lambda(), n), BigUint::one());
    }

    #[test]
    fn smallest_key_size_is_usable() {
        let secret = generate_key(&mut OsRng, MIN_KEY_BITS).unwrap();
        assert_eq!(secret.public_key().n(), &BigUint::from(143u32));
        assert_eq!(secret.lambda(), &BigUint::from(60u32));
    }

    #[test]
    fn rejects_tiny_key_size() {
        let result = generate_key(&mut OsRng, 7);
        assert_eq!(result.err(), Some(Error::InvalidKeySize { min: MIN_KEY_BITS, actual: 7 }));
    }

    #[test]
    fn propagates_entropy_failure() {
        let result = generate_key(&mut FailingRng, 512);
        assert!(matches!(result, Err(Error::Entropy(_))));

        let result = KeyPairBuilder::new().bit_length(512).build_with_rng(&mut FailingRng);
        assert!(matches!(result, Err(Error::Entropy(_))));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let k1 = generate_key(&mut StdRng::seed_from_u64(1), 256).unwrap();
        let k2 = generate_key(&mut StdRng::seed_from_u64(1), 256).unwrap();
        let k3 = generate_key(&mut StdRng::seed_from_u64(2), 256).unwrap();

        assert!(k1 == k2);
        assert_ne!(k1.public_key(), k3.public_key());
    }

    #[test]
    fn keypair_shares_public_key() {
        let keypair = KeyPairBuilder::new().bit_length(256).build().unwrap();

        assert_eq!(keypair.public_key(), keypair.private_key().public_key());
        assert!(Arc::ptr_eq(
            &keypair.shared_public_key(),
            &keypair.private_key().shared_public_key()
        ));
    }

    #[test]
    fn builder_defaults() {
        let builder = KeyPairBuilder::default();
        assert_eq!(builder.bit_length, DEFAULT_KEY_BITS);
    }
}
