//! # Safe Prime — Combined-Sieve Safe-Prime Generation
//!
//! A safe prime is p = 2q + 1 with q (the Sophie Germain prime) prime as
//! well. Testing the pair naively costs two full primality runs per
//! candidate; the combined sieve rejects most candidates with one pass of
//! cheap remainders by checking both family members against every small
//! prime r at once:
//!
//! - `q mod r == 0` — r divides q;
//! - `q mod r == (r - 1) / 2` — r divides 2q + 1 = p.
//!
//! Only candidates clean on both counts earn Miller-Rabin time, and by the
//! time p itself is formed it needs no sieving at all.
//!
//! ## References
//!
//! - Michael J. Wiener, "Safe Prime Generation with a Combined Sieve",
//!   2003: <https://eprint.iacr.org/2003/186>
//! - OEIS: [A005385](https://oeis.org/A005385) — safe primes.

use anyhow::Result;
use rand::CryptoRng;
use rug::Integer;
use tracing::debug;

use crate::small_primes::SmallPrimes;
use crate::{primality, random, Interrupt};

/// What one pass of the combined sieve established about a candidate q.
enum SieveVerdict {
    /// Some small prime divides q or would divide 2q + 1.
    Composite,
    /// The table ran past q itself without finding a divisor: q is prime by
    /// exhaustion and needs no Miller-Rabin.
    Prime,
    /// Both family members survived every tested prime; q still needs
    /// Miller-Rabin.
    Undecided,
}

/// Trial-divides `q` and (implicitly) `2q + 1` by the first `depth` table
/// primes.
fn combined_sieve(q: &Integer, primes: &SmallPrimes, depth: usize) -> SieveVerdict {
    if let Some(qv) = q.to_u64() {
        for &r in &primes.words()[..depth] {
            if r >= qv {
                return SieveVerdict::Prime;
            }
            let rem = qv % r;
            if rem == 0 || rem == (r - 1) / 2 {
                return SieveVerdict::Composite;
            }
        }
    } else {
        // q is beyond every table prime, so no prime-by-exhaustion exit
        // here. The word table supplies the thresholds: it holds the same
        // values as the arbitrary-precision table used for the remainders.
        for (&r, r_big) in primes.words()[..depth].iter().zip(&primes.big()[..depth]) {
            let rem = Integer::from(q % r_big);
            if rem == 0u32 || rem == (r - 1) / 2 {
                return SieveVerdict::Composite;
            }
        }
    }
    SieveVerdict::Undecided
}

/// Generates a random safe probable prime p = 2q + 1 with exactly `bits`
/// significant bits, where q is a probable prime of `bits - 1` bits.
///
/// Candidates for q are drawn odd, run through the combined sieve at the
/// depth the policy picks for `bits`, and only survivors get Miller-Rabin —
/// first q, then p directly (the sieve already excluded p's small factors).
/// A failure at any stage resamples q from scratch. Unbounded like
/// [`gen_pseudoprime`](crate::pseudoprime::gen_pseudoprime); `interrupt` is
/// polled once per candidate.
///
/// Fails when `bits < 3` — the smallest safe prime is 7, at three bits.
pub fn gen_safe_pseudoprime<R: CryptoRng + ?Sized>(
    bits: u32,
    confidence: u32,
    primes: &SmallPrimes,
    rng: &mut R,
    interrupt: Option<&dyn Interrupt>,
) -> Result<Integer> {
    if bits < 3 {
        anyhow::bail!(
            "safe-prime generation needs a bit length of at least 3, got {}",
            bits
        );
    }

    let qbits = bits - 1;
    // Depth keyed to the size of the prime being produced, not of q.
    let depth = primes.trial_depth(bits);

    let mut attempts: u64 = 0;
    loop {
        if interrupt.is_some_and(|i| i.is_interrupted()) {
            debug!(bits, attempts, "generation interrupted");
            anyhow::bail!(
                "safe-prime generation interrupted after {} candidates",
                attempts
            );
        }
        attempts += 1;

        let mut q = random::random_bits(qbits, rng)?;
        q |= 1u32; // make it odd

        match combined_sieve(&q, primes, depth) {
            SieveVerdict::Composite => continue,
            SieveVerdict::Prime => {}
            SieveVerdict::Undecided => {
                if !primality::rabin_miller(&q, confidence, rng) {
                    continue;
                }
            }
        }

        let p = Integer::from(&q << 1) + 1u32;
        if primality::rabin_miller(&p, confidence, rng) {
            debug!(bits, attempts, "safe pseudoprime accepted");
            return Ok(p);
        }
    }
}
