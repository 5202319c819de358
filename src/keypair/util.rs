// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::One;

/// lcm(a, b) = a·b / gcd(a, b)
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) / a.gcd(b)
}

/// Checks the condition `gcd(pq, (p-1)(q-1)) = 1` under which `g = n + 1`
/// yields a well-defined decryption trapdoor.
///
/// Returns `n = pq` when the pair is usable.
pub fn usable_modulus(p: &BigUint, q: &BigUint) -> Option<BigUint> {
    if p == q {
        return None;
    }

    let one = BigUint::one();
    let n = p * q;
    let phi = (p - &one) * (q - &one);

    n.gcd(&phi).is_one().then_some(n)
}
