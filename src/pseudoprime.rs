//! # Pseudoprime — Random Probable-Prime Generation
//!
//! Sample-and-test: draw a candidate of the requested bit length, force it
//! odd, and keep going until [`primality::is_probable_prime`] accepts one.
//! By the prime number theorem a random `bits`-bit odd number is prime with
//! probability about 2 / (bits · ln 2), so the expected number of candidates
//! grows only linearly with the bit length.

use anyhow::Result;
use rand::CryptoRng;
use rug::Integer;
use tracing::debug;

use crate::small_primes::SmallPrimes;
use crate::{primality, random, Interrupt};

/// Generates a random probable prime with exactly `bits` significant bits,
/// tested at `confidence` Miller-Rabin rounds.
///
/// The loop is unbounded: every bit length from 2 up holds an odd prime
/// (3 is the two-bit case), so only the random stream's luck decides the
/// iteration count. `interrupt` is polled once per candidate; an
/// interrupted call fails instead of returning a prime.
///
/// Fails when `bits < 2` — no prime fits in fewer than two bits.
pub fn gen_pseudoprime<R: CryptoRng + ?Sized>(
    bits: u32,
    confidence: u32,
    primes: &SmallPrimes,
    rng: &mut R,
    interrupt: Option<&dyn Interrupt>,
) -> Result<Integer> {
    if bits < 2 {
        anyhow::bail!(
            "pseudoprime generation needs a bit length of at least 2, got {}",
            bits
        );
    }

    let mut attempts: u64 = 0;
    loop {
        if interrupt.is_some_and(|i| i.is_interrupted()) {
            debug!(bits, attempts, "generation interrupted");
            anyhow::bail!(
                "pseudoprime generation interrupted after {} candidates",
                attempts
            );
        }
        attempts += 1;

        let mut candidate = random::random_bits(bits, rng)?;
        candidate |= 1u32; // make it odd
        if primality::is_probable_prime(&candidate, confidence, primes, rng) {
            debug!(bits, attempts, "pseudoprime accepted");
            return Ok(candidate);
        }
    }
}
