//! Polynomial string hash and the double-hashing probe built on it.
//!
//! Both functions are deterministic and unseeded: the same key always maps
//! to the same probe sequence for a given bucket count.

use crate::{PRIME_ONE, PRIME_TWO};

/// Positional polynomial hash of `s` reduced modulo `modulus`.
///
/// Computes `sum(prime^(n-1-i) * s[i]) mod modulus` in Horner form, reducing
/// after every byte. Intermediate products are taken in `u128`, so the
/// result is exact for keys of any length.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn hash(s: &[u8], prime: u64, modulus: u64) -> u64 {
    let m = u128::from(modulus);
    let p = u128::from(prime) % m;
    let mut h: u128 = 0;
    for &b in s {
        h = (h * p + u128::from(b)) % m;
    }
    h as u64
}

/// Slot index for `attempt` in the double-hash probe sequence of `s`.
///
/// `(hash(s, PRIME_ONE, buckets) + attempt * (hash(s, PRIME_TWO, buckets) + 1)) mod buckets`
///
/// # Panics
///
/// Panics if `buckets` is zero.
pub fn hash_function(s: &[u8], buckets: usize, attempt: usize) -> usize {
    let hash_a = hash(s, PRIME_ONE, buckets as u64);
    let hash_b = hash(s, PRIME_TWO, buckets as u64);
    offset(hash_a, hash_b + 1, attempt, buckets)
}

#[inline]
fn offset(hash_a: u64, step: u64, attempt: usize, buckets: usize) -> usize {
    let idx = (u128::from(hash_a) + attempt as u128 * u128::from(step)) % buckets as u128;
    idx as usize
}

/// Iterator over the slot indices `hash_function(key, buckets, 0..buckets)`.
///
/// Both component hashes are computed once up front instead of once per
/// attempt.
#[derive(Clone, Debug)]
pub struct ProbeSequence {
    hash_a: u64,
    step: u64,
    buckets: usize,
    attempt: usize,
}

impl ProbeSequence {
    pub fn new(key: &[u8], buckets: usize) -> Self {
        Self {
            hash_a: hash(key, PRIME_ONE, buckets as u64),
            step: hash(key, PRIME_TWO, buckets as u64) + 1,
            buckets,
            attempt: 0,
        }
    }

    /// True when the step is a multiple of the bucket count, i.e. the
    /// second hash is `buckets - 1` and every attempt lands on the first
    /// slot of the sequence.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.step % self.buckets as u64 == 0
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.attempt >= self.buckets {
            return None;
        }
        let idx = offset(self.hash_a, self.step, self.attempt, self.buckets);
        self.attempt += 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.buckets - self.attempt;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ProbeSequence {}
