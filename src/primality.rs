//! # Primality — Miller-Rabin and the Probable-Prime Oracle
//!
//! [`is_probable_prime`] is the decision procedure the generators call:
//! reject 0 and ±1, trial-divide by small primes to a depth tuned to the
//! candidate's bit length, then hand survivors to [`rabin_miller`]. Trial
//! division is cheap next to modular exponentiation, so the sieve stage
//! removes the bulk of composites before any witness is raised.
//!
//! ## Algorithm: Miller-Rabin
//!
//! Decompose w − 1 = 2^a · m with m odd. For each of `confidence` rounds,
//! draw a witness b uniformly from [2, w−1) and compute z = b^m mod w. The
//! round passes if z is 1 or w−1; otherwise square z up to a−1 times,
//! passing if w−1 appears and failing outright if 1 appears first (a
//! nontrivial square root of 1 proves w composite). A composite survives
//! one round with probability at most 1/4, so the false-positive
//! probability after `confidence` independent rounds is at most
//! 4^(−confidence). A `false` verdict is always correct.
//!
//! ## References
//!
//! - FIPS 186-4, appendix C.3.1 (Miller-Rabin probabilistic primality test).
//! - Rabin, "Probabilistic algorithm for testing primality", J. Number
//!   Theory 12, 1980.

use rand::CryptoRng;
use rug::Integer;

use crate::small_primes::SmallPrimes;
use crate::{bit_length, random};

/// Runs `confidence` Miller-Rabin rounds against `w` with random witnesses.
///
/// Returns `true` when `w` is a strong probable prime to every sampled
/// witness; the verdict is wrong with probability at most `4^(-confidence)`.
/// Expects an odd `w >= 3` (anything the sieve stage lets through); other
/// inputs get the honest answer without sampling: 2 is prime, everything
/// else is not.
pub fn rabin_miller<R: CryptoRng + ?Sized>(w: &Integer, confidence: u32, rng: &mut R) -> bool {
    if w.is_even() || *w < 3u32 {
        return *w == 2u32;
    }

    let w_minus_1 = Integer::from(w - 1u32);
    // w - 1 = 2^a * m with m odd.
    let a = w_minus_1.find_one(0).expect("w - 1 is nonzero for w >= 3");
    let m = Integer::from(&w_minus_1 >> a);

    let two = Integer::from(2u32);
    for _ in 0..confidence {
        let b = random::random_range(&two, &w_minus_1, rng)
            .expect("witness range [2, w - 1) is valid for w >= 3");

        let mut z = b.pow_mod(&m, w).expect("exponent m is non-negative");
        if z == 1u32 || z == w_minus_1 {
            continue;
        }

        for _ in 1..a {
            z = z.square() % w;
            if z == 1u32 {
                // Nontrivial square root of 1: w is composite, no doubt.
                return false;
            }
            if z == w_minus_1 {
                break;
            }
        }
        if z != w_minus_1 {
            return false;
        }
    }

    true
}

/// Probable-primality oracle: trial division against `primes` to a
/// bit-length-tuned depth, then [`rabin_miller`] with `confidence` rounds.
///
/// Operates on the absolute value; 0 and ±1 are composite by convention.
/// Candidates that fit a machine word walk the word table, where reaching a
/// table prime `p >= |n|` proves `|n|` prime outright (every prime below it
/// has already been tried). Larger candidates take the arbitrary-precision
/// table, divisibility checks only.
pub fn is_probable_prime<R: CryptoRng + ?Sized>(
    n: &Integer,
    confidence: u32,
    primes: &SmallPrimes,
    rng: &mut R,
) -> bool {
    let val = Integer::from(n.abs_ref());
    if val == 0u32 || val == 1u32 {
        return false;
    }

    let depth = primes.trial_depth(bit_length(&val));

    if let Some(v) = val.to_u64() {
        for &p in &primes.words()[..depth] {
            if p >= v {
                return true;
            }
            if v % p == 0 {
                return false;
            }
        }
    } else {
        for p in &primes.big()[..depth] {
            if val.is_divisible(p) {
                return false;
            }
        }
    }

    rabin_miller(&val, confidence, rng)
}
