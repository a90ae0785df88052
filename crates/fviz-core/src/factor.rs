#![forbid(unsafe_code)]

//! Prime factorization by ascending trial division.

use std::fmt;

/// Error raised for integer inputs outside the supported domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorError {
    /// Input was zero; factorization requires n >= 1.
    InvalidInput,
}

impl fmt::Display for FactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "input integer must be >= 1"),
        }
    }
}

impl std::error::Error for FactorError {}

/// Decompose `n` into its prime factors in non-decreasing order, each
/// repeated per its multiplicity.
///
/// `factorize(12)` is `[2, 2, 3]`; a prime maps to the one-element sequence
/// `[n]`; `1` maps to the empty sequence (no sub-division). Runs in O(sqrt n)
/// trial divisions.
pub fn factorize(mut n: u64) -> Result<Vec<u64>, FactorError> {
    if n == 0 {
        return Err(FactorError::InvalidInput);
    }

    let mut factors = Vec::new();

    let mut d = 2;
    while d <= n / d {
        while n % d == 0 {
            factors.push(d);
            n /= d;
        }
        d += if d == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push(n);
    }

    Ok(factors)
}

/// Trial-division primality test.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
