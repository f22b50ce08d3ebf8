//! Number-theoretic primitives for public-key key generation on top of
//! [`rug::Integer`]: cryptographically uniform random sampling, modular
//! inversion, trial division tuned by bit length, Miller-Rabin primality
//! testing, and generation of probable primes and safe probable primes.
//!
//! Every random draw comes from a caller-supplied [`rand::CryptoRng`]; no
//! function captures a random source of its own. Generation loops retry
//! until they succeed and accept an optional [`Interrupt`] so callers can
//! impose deadlines from outside.

pub mod modular;
pub mod primality;
pub mod pseudoprime;
pub mod random;
pub mod safe_prime;
pub mod small_primes;

use rug::Integer;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trait for cooperative cancellation of unbounded generation loops.
/// Generators accept `Option<&dyn Interrupt>` and poll it once per candidate;
/// an interrupted loop returns an error instead of a prime.
pub trait Interrupt: Send + Sync {
    fn is_interrupted(&self) -> bool;
}

/// Shared-flag cancellation: store `true` from another thread to interrupt.
impl Interrupt for AtomicBool {
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Position of the most significant set bit of `n`'s absolute value, 1-based.
/// Zero maps to 1 (a zero value still occupies one bit); the sign is ignored.
///
/// Examples: `bit_length(0) == 1`, `bit_length(1) == 1`, `bit_length(2) == 2`,
/// `bit_length(0b10011) == 5`.
pub fn bit_length(n: &Integer) -> u32 {
    n.significant_bits().max(1)
}
