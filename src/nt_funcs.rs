//! Standalone number theoretic functions backing the Mersenne factor search

use crate::tables::SMALL_PRIMES;
use bitvec::bitvec;
use num_modular::ModularCoreOps;
use std::convert::TryFrom;

/// Test whether the target is a prime number by exhaustive trial division.
///
/// Every odd integer from 3 up to and including the integer square root of
/// the target is tried as a divisor, so the result is exact over the whole
/// u64 range. Targets below 256 are answered from [SMALL_PRIMES] directly.
pub fn is_prime(target: u64) -> bool {
    // shortcuts
    if target < 2 {
        return false;
    }
    if target & 1 == 0 {
        return target == 2;
    }

    // first find in the prime table
    if let Ok(u) = u8::try_from(target) {
        return SMALL_PRIMES.binary_search(&u).is_ok();
    }

    // then trial divide by the odd integers up to the square root
    let root = num_integer::sqrt(target);
    let mut i = 3;
    while i <= root {
        if target % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Modular exponentiation, (base ^ exponent) % modulus, by binary
/// square-and-multiply.
///
/// The base is reduced up front and every multiplication goes through
/// [num_modular::ModularCoreOps], so operands never leave the u64 range.
/// The degenerate modulus 1 maps every input to 0.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }

    let mut result = 1;
    let mut base = base % modulus;
    let mut exponent = exponent;
    while exponent > 0 {
        // multiply the result in whenever the lowest exponent bit is set
        if exponent & 1 == 1 {
            result = result.mulm(base, &modulus);
        }
        exponent >>= 1;
        base = base.mulm(base, &modulus);
    }
    result
}

/// Returns all primes **below** the limit. The primes are sorted.
///
/// One-shot sieve of Eratosthenes over the odd integers.
pub fn primes(limit: u64) -> Vec<u64> {
    if limit <= 2 {
        return Vec::new();
    }

    // bit i of the sieve stands for the odd number 2*i + 3
    let size = ((limit - 2) / 2) as usize;
    let mut sieve = bitvec![0; size];
    let root = num_integer::sqrt(limit);
    let mut p = 3u64;
    while p <= root {
        if !sieve[((p - 3) / 2) as usize] {
            let mut multi = p * p;
            while multi < limit {
                sieve.set(((multi - 3) / 2) as usize, true);
                multi += 2 * p;
            }
        }
        p += 2;
    }

    let mut list = vec![2];
    list.extend(sieve.iter_zeros().map(|i| 2 * (i as u64) + 3));
    list
}
