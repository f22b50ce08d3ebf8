//! # Small Primes — Trial-Division Tables and Depth Policy
//!
//! Trial division by small primes is the cheap first stage of every
//! primality decision in this crate: most composites fall to it before any
//! modular exponentiation is paid for. [`SmallPrimes`] bundles the first
//! ~14k primes in two parallel representations — machine words for
//! candidates that fit `u64`, arbitrary precision for everything larger —
//! together with the policy that decides, per candidate bit length, how
//! deep into the table to divide.
//!
//! The tables are plain construction-time configuration: build once, share
//! by reference. Nothing here is global and nothing is mutable after
//! construction, so a single instance can serve any number of threads.
//!
//! ## Depth policy
//!
//! Sieving deeper rejects more composites before the Miller-Rabin stage,
//! but each extra prime costs a division; the optimal crossover moves with
//! candidate size because modular exponentiation cost grows much faster
//! than division cost. The step function in [`SmallPrimes::trial_depth`]
//! encodes the empirically tuned crossover per bit length.

use rug::Integer;
use tracing::debug;

/// Exclusive upper bound of the default prime tables. Covers the deepest
/// row of the trial-division policy exactly.
pub const DEFAULT_LIMIT: u32 = 150_000;

/// Ascending small-prime tables plus the bit-length to trial-division-depth
/// policy.
///
/// The two tables always hold identical values in identical order;
/// algorithms pick whichever representation matches the candidate's
/// magnitude.
pub struct SmallPrimes {
    words: Vec<u64>,
    big: Vec<Integer>,
}

impl SmallPrimes {
    /// Tables of every prime below [`DEFAULT_LIMIT`] (13848 primes).
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Tables of every prime below `limit`. With a limit below the default,
    /// [`trial_depth`](Self::trial_depth) clamps to the table length; going
    /// above the default buys nothing for the built-in policy but is
    /// harmless.
    pub fn with_limit(limit: u32) -> Self {
        let words = sieve(limit);
        let big = words.iter().map(|&p| Integer::from(p)).collect();
        debug!(limit, count = words.len(), "small-prime tables built");
        SmallPrimes { words, big }
    }

    /// Number of leading table primes to trial-divide for a candidate of
    /// the given bit length.
    ///
    /// ```text
    ///  bit length | test primes below | count
    /// ------------+-------------------+-------
    ///      <= 192 |              1000 |   168
    ///      <= 384 |              2000 |   303
    ///     <= 1536 |             10000 |  1229
    ///     <= 3072 |             50000 |  5133
    ///     <= 6144 |            100000 |  9592
    ///        else |            150000 | 13848
    /// ```
    pub fn trial_depth(&self, bit_length: u32) -> usize {
        let bound: u64 = match bit_length {
            0..=192 => 1_000,
            193..=384 => 2_000,
            385..=1536 => 10_000,
            1537..=3072 => 50_000,
            3073..=6144 => 100_000,
            _ => 150_000,
        };
        // partition_point doubles as the clamp for undersized tables.
        self.words.partition_point(|&p| p < bound)
    }

    /// Machine-word table, ascending.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Arbitrary-precision table, ascending; value-for-value identical to
    /// [`words`](Self::words).
    pub fn big(&self) -> &[Integer] {
        &self.big
    }

    /// Number of primes in the tables.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the tables hold no primes (limit below 3).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Binary search for `n` in the table. Only meaningful for `n` below
    /// the construction limit.
    pub fn contains(&self, n: u64) -> bool {
        self.words.binary_search(&n).is_ok()
    }
}

impl Default for SmallPrimes {
    fn default() -> Self {
        Self::new()
    }
}

/// Classic odd-only sieve of Eratosthenes. At the default limit this runs
/// in well under a millisecond; compressed wheels only start paying off at
/// limits a few orders of magnitude beyond anything the depth policy uses.
fn sieve(limit: u32) -> Vec<u64> {
    let limit = limit as usize;
    if limit <= 2 {
        return Vec::new();
    }

    // composite[i] covers the odd number 2*i + 1; index 0 (the unit 1) is
    // never read.
    let half = limit / 2;
    let mut composite = vec![false; half];
    let mut p = 3usize;
    while p * p < limit {
        if !composite[p / 2] {
            let mut multiple = p * p;
            while multiple < limit {
                composite[multiple / 2] = true;
                multiple += 2 * p;
            }
        }
        p += 2;
    }

    let mut primes = Vec::with_capacity(half / 4 + 8);
    primes.push(2u64);
    for i in 1..half {
        if !composite[i] {
            primes.push((2 * i + 1) as u64);
        }
    }
    primes
}
