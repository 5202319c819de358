// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse};
use num_traits::{CheckedSub, One, Zero};

/// L(x) = (x - 1) / n
///
/// Exact for every `x ≡ 1 (mod n)`, which holds for `x = c^λ mod n²` whenever
/// `c` is a unit modulo `n²`. Returns `None` for `x == 0` instead of
/// underflowing.
#[inline]
pub fn l_function(x: &BigUint, n: &BigUint) -> Option<BigUint> {
    debug_assert!(!n.is_zero(), "n must be nonzero in L function");

    x.checked_sub(&BigUint::one()).map(|x_minus_1| x_minus_1 / n)
}

/// Computes modular inverse a⁻¹ mod m, or `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    a.mod_inverse(m)?.to_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l_function_divides_exactly() {
        let n = BigUint::from(15u32);
        // 1 + 7n
        let x = BigUint::from(106u32);
        assert_eq!(l_function(&x, &n), Some(BigUint::from(7u32)));
        assert_eq!(l_function(&BigUint::one(), &n), Some(BigUint::from(0u32)));
    }

    #[test]
    fn l_function_rejects_zero() {
        assert_eq!(l_function(&BigUint::from(0u32), &BigUint::from(15u32)), None);
    }

    #[test]
    fn mod_inverse_matches_known_values() {
        let a = BigUint::from(47u32);
        let m = BigUint::from(30u32);
        assert_eq!(mod_inverse(&a, &m), Some(BigUint::from(23u32)));

        let not_coprime = BigUint::from(6u32);
        assert_eq!(mod_inverse(&not_coprime, &m), None);
    }
}
