// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random prime generation for Paillier key generation.
//!
//! Candidates are drawn directly from the caller's random source so that a
//! failing entropy source surfaces as an error instead of a panic:
//! - Exact bit length and odd parity are forced on every candidate
//! - Pre-sieving with small primes rejects most composites early
//! - Miller-Rabin rounds are picked from the candidate size

use num_bigint_dig::BigUint;
use num_bigint_dig::prime::probably_prime;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};
use tracing::trace;

use crate::{Error, Result};

/// Minimum bit length for a generated prime.
///
/// Four bits is the smallest size that still holds two distinct odd primes
/// with the top bit set (11 and 13).
pub const MIN_PRIME_BITS: usize = 4;

/// Small odd primes used to sieve candidates before Miller-Rabin.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Generate a random probable prime of exactly `bits` bits.
///
/// Loops until a candidate passes; the expected number of draws grows
/// linearly with `bits` (prime density is about `1 / ln(2^bits)`).
///
/// # Errors
///
/// Returns [`Error::BitLengthTooShort`] if `bits < MIN_PRIME_BITS` and
/// [`Error::Entropy`] as soon as the random source fails. Key generation
/// validates its own size first, so the former only guards internal callers.
pub fn random_prime<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> Result<BigUint> {
    if bits < MIN_PRIME_BITS {
        return Err(Error::BitLengthTooShort(bits));
    }

    let rounds = miller_rabin_rounds(bits);
    let mut draws = 0usize;

    loop {
        draws += 1;
        let candidate = generate_candidate(bits, rng)?;

        if has_small_factor(&candidate) {
            continue;
        }

        if probably_prime(&candidate, rounds) {
            trace!(bits, draws, "found probable prime");
            return Ok(candidate);
        }
    }
}

/// Draw a random odd candidate with its two most significant bits set.
///
/// Two top bits make the product of two such primes exactly twice as long as
/// either factor. At `MIN_PRIME_BITS` only the top bit is forced, otherwise
/// 13 would be the sole candidate.
fn generate_candidate<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> Result<BigUint> {
    let mut bytes = vec![0u8; bits.div_ceil(8)];
    rng.try_fill_bytes(&mut bytes)?;

    // Drop the bits above the requested length.
    let excess = bytes.len() * 8 - bits;
    bytes[0] &= 0xff >> excess;

    let mut candidate = BigUint::from_bytes_be(&bytes);
    candidate |= BigUint::one() << (bits - 1);
    if bits > MIN_PRIME_BITS {
        candidate |= BigUint::one() << (bits - 2);
    }
    candidate |= BigUint::one();

    Ok(candidate)
}

/// Returns true if `n` is divisible by a sieve prime other than itself.
#[inline]
fn has_small_factor(n: &BigUint) -> bool {
    let small = n.to_u32();
    SIEVE_PRIMES
        .iter()
        .any(|&prime| small != Some(prime) && (n % prime).is_zero())
}

/// Miller-Rabin rounds for a target error probability below 2^-100,
/// following FIPS 186-4 Table C.1.
#[inline]
const fn miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::{OsRng, StdRng};

    use crate::test_util::FailingRng;

    #[test]
    fn generates_prime_of_requested_size() {
        let mut rng = StdRng::seed_from_u64(7);

        for bits in [16, 64, 128, 256] {
            let p = random_prime(bits, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(p >= BigUint::from(3u32) << (bits - 2), "second top bit must be set");
            assert_eq!(&p % 2u32, BigUint::one(), "p must be odd");
            assert!(probably_prime(&p, 20));
        }
    }

    #[test]
    fn smallest_primes_are_not_sieved_out() {
        let mut rng = OsRng;
        for _ in 0..32 {
            let p = random_prime(MIN_PRIME_BITS, &mut rng).unwrap();
            assert!(p == BigUint::from(11u32) || p == BigUint::from(13u32), "got {}", p);
        }
    }

    #[test]
    fn product_of_two_primes_doubles_the_length() {
        let mut rng = StdRng::seed_from_u64(11);

        for bits in [5, 8, 32, 64] {
            for _ in 0..16 {
                let p = random_prime(bits, &mut rng).unwrap();
                let q = random_prime(bits, &mut rng).unwrap();
                assert_eq!((&p * &q).bits(), 2 * bits, "{} * {}", p, q);
            }
        }
    }

    #[test]
    fn sieve_keeps_small_primes() {
        assert!(!has_small_factor(&BigUint::from(997u32)));
        assert!(has_small_factor(&BigUint::from(997u32 * 3)));
        assert!(has_small_factor(&BigUint::from(15u32)));
    }

    #[test]
    fn rejects_short_bit_lengths() {
        let mut rng = OsRng;
        assert_eq!(random_prime(3, &mut rng), Err(Error::BitLengthTooShort(3)));
        assert_eq!(random_prime(0, &mut rng), Err(Error::BitLengthTooShort(0)));
    }

    #[test]
    fn propagates_entropy_failure() {
        let result = random_prime(64, &mut FailingRng);
        assert!(matches!(result, Err(Error::Entropy(_))));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let p1 = random_prime(128, &mut StdRng::seed_from_u64(42)).unwrap();
        let p2 = random_prime(128, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(p1, p2);
    }
}
