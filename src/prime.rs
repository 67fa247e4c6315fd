//! Primality helpers used to size the backing array.
//!
//! The table never stores its size directly as requested; it stores a
//! `base_size` and uses the first prime at or above it. A prime number of
//! buckets keeps the double-hash step coprime with the table length, so a
//! probe sequence with a nonzero step visits every slot.

/// Outcome of a primality test.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primality {
    /// Primality is not defined for values below 2.
    Undefined,
    Composite,
    Prime,
}

impl Primality {
    #[inline]
    pub fn is_prime(self) -> bool {
        self == Primality::Prime
    }
}

/// Classify `x` by trial division over odd divisors up to `floor(sqrt(x))`.
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::Composite;
    }
    let mut i = 3;
    // `i <= x / i` is `i * i <= x` without the overflow.
    while i <= x / i {
        if x % i == 0 {
            return Primality::Composite;
        }
        i += 2;
    }
    Primality::Prime
}

/// Return `x` if it is prime, otherwise the next prime above it.
///
/// There is no upper bound check: for inputs with no representable prime
/// above them this loops forever (and overflows in debug builds). Callers
/// only pass table sizes, which are far from that range.
pub fn next_prime(mut x: usize) -> usize {
    while !is_prime(x).is_prime() {
        x += 1;
    }
    x
}
