//! # Random — Cryptographically Secure Integer Sampling
//!
//! Two samplers feed the prime-generation pipeline:
//!
//! 1. **Fixed bit length** ([`random_bits`]) — a non-negative integer with
//!    exactly `bits` significant bits. The top bit is forced to 1, every bit
//!    below it is drawn uniformly.
//! 2. **Uniform range** ([`random_range`]) — a draw from the half-open range
//!    `[min, max)` by rejection sampling. There is no modulo step, so there
//!    is no modulo bias; the price is a geometrically decaying number of
//!    redraws (expected < 2, since at least half of each masked byte space
//!    is in range).
//!
//! Raw bytes become integers as little-endian magnitudes via
//! [`Integer::from_digits`]; sign never enters the picture. The random
//! source is any caller-supplied [`CryptoRng`], which keeps every operation
//! deterministic under a seeded generator and safe to run concurrently with
//! one generator per thread.

use anyhow::Result;
use rand::CryptoRng;
use rug::integer::Order;
use rug::Integer;

/// Returns a non-negative random integer with exactly `bits` significant
/// bits: the most significant bit is forced to 1 and the remaining
/// `bits - 1` bits are uniform. For `bits == 1` the result is instead a
/// uniform draw from {0, 1} (zero occupies one bit by convention, so both
/// values have bit length 1).
///
/// Prime candidates need an exact, known bit length: trial-division depth
/// and witness ranges are both selected from it, and an approximate length
/// would skew the size distribution of generated primes.
///
/// Fails when `bits == 0`.
pub fn random_bits<R: CryptoRng + ?Sized>(bits: u32, rng: &mut R) -> Result<Integer> {
    if bits == 0 {
        anyhow::bail!("number of random bits must be greater than zero");
    }

    let nbytes = bits.div_ceil(8) as usize;
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);

    if bits == 1 {
        return Ok(Integer::from(buf[0] & 1));
    }

    // Index of the forced top bit within the most significant byte.
    let top = (bits - 1) % 8;
    let last = nbytes - 1;
    buf[last] &= ((1u16 << (top + 1)) - 1) as u8;
    buf[last] |= 1u8 << top;

    Ok(Integer::from_digits(&buf, Order::Lsf))
}

/// Returns a uniform random draw from the half-open range `[min, max)`.
///
/// Rejection sampling over the zero-based inclusive bound
/// `upper = max - 1 - min`: draw exactly enough bytes to cover `upper`'s
/// bit length, mask the excess bits of the top byte, and accept the first
/// draw that lands at or below `upper`. Every value in the range is exactly
/// equally likely. Negative bounds are fine; only the zero-based offset is
/// ever sampled.
///
/// Returns `min` when `min == max`; fails when `min > max`.
pub fn random_range<R: CryptoRng + ?Sized>(
    min: &Integer,
    max: &Integer,
    rng: &mut R,
) -> Result<Integer> {
    if min > max {
        anyhow::bail!("range lower bound {} exceeds upper bound {}", min, max);
    }
    if min == max {
        return Ok(min.clone());
    }

    let upper = Integer::from(max - 1u32) - min;
    let bits = upper.significant_bits();
    if bits == 0 {
        // upper == 0: the range holds a single value.
        return Ok(min.clone());
    }

    let nbytes = bits.div_ceil(8) as usize;
    let top_mask = ((1u16 << ((bits - 1) % 8 + 1)) - 1) as u8;

    let mut buf = vec![0u8; nbytes];
    loop {
        rng.fill_bytes(&mut buf);
        buf[nbytes - 1] &= top_mask;
        let draw = Integer::from_digits(&buf, Order::Lsf);
        if draw <= upper {
            return Ok(draw + min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_length;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_bits_rejects_zero_bits() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_bits(0, &mut rng).is_err());
    }

    #[test]
    fn random_bits_exact_length() {
        let mut rng = StdRng::seed_from_u64(2);
        for bits in 2u32..=300 {
            for _ in 0..8 {
                let n = random_bits(bits, &mut rng).unwrap();
                assert_eq!(bit_length(&n), bits, "wrong length for bits = {}", bits);
            }
        }
    }

    #[test]
    fn random_bits_byte_boundaries() {
        // Lengths straddling byte boundaries are where masking bugs live.
        let mut rng = StdRng::seed_from_u64(3);
        for bits in [7u32, 8, 9, 15, 16, 17, 63, 64, 65, 255, 256, 257, 1023, 1024] {
            for _ in 0..16 {
                let n = random_bits(bits, &mut rng).unwrap();
                assert_eq!(bit_length(&n), bits, "wrong length for bits = {}", bits);
            }
        }
    }

    #[test]
    fn random_bits_single_bit_covers_both_values() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = [false; 2];
        for _ in 0..100 {
            let n = random_bits(1, &mut rng).unwrap();
            assert!(n == 0u32 || n == 1u32, "single-bit draw out of range: {}", n);
            seen[n.to_usize().unwrap()] = true;
        }
        assert!(seen[0] && seen[1], "100 single-bit draws never hit one of 0/1");
    }

    #[test]
    fn random_bits_word_sized_fits_u64() {
        let mut rng = StdRng::seed_from_u64(5);
        for bits in 2u32..=64 {
            let n = random_bits(bits, &mut rng).unwrap();
            assert!(n.to_u64().is_some(), "{}-bit draw exceeds u64", bits);
        }
    }

    #[test]
    fn random_range_equal_bounds_returns_min() {
        let mut rng = StdRng::seed_from_u64(6);
        let b = Integer::from(42u32);
        assert_eq!(random_range(&b, &b, &mut rng).unwrap(), b);
    }

    #[test]
    fn random_range_inverted_bounds_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let lo = Integer::from(10u32);
        let hi = Integer::from(5u32);
        assert!(random_range(&lo, &hi, &mut rng).is_err());
    }

    #[test]
    fn random_range_single_value_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let min = Integer::from(5u32);
        let max = Integer::from(6u32);
        for _ in 0..10 {
            assert_eq!(random_range(&min, &max, &mut rng).unwrap(), min);
        }
    }

    #[test]
    fn random_range_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let ranges = [
            (Integer::from(0u32), Integer::from(8u32)),
            (Integer::from(2u32), Integer::from(97u32)),
            (Integer::from(-50i32), Integer::from(50i32)),
            (Integer::from(-1000i32), Integer::from(-900i32)),
            (Integer::from(u64::MAX), Integer::from(u64::MAX) * 3u32),
        ];
        for (min, max) in &ranges {
            for _ in 0..500 {
                let n = random_range(min, max, &mut rng).unwrap();
                assert!(
                    n >= *min && n < *max,
                    "draw {} outside [{}, {})",
                    n,
                    min,
                    max
                );
            }
        }
    }

    #[test]
    fn random_range_covers_small_range() {
        let mut rng = StdRng::seed_from_u64(10);
        let min = Integer::from(0u32);
        let max = Integer::from(8u32);
        let mut seen = [false; 8];
        for _ in 0..200 {
            let n = random_range(&min, &max, &mut rng).unwrap();
            seen[n.to_usize().unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s), "200 draws missed a value in [0, 8)");
    }

    #[test]
    fn random_range_roughly_uniform() {
        // 4000 draws over 8 buckets: expected 500 per bucket, and the seeded
        // generator makes the counts reproducible. A bucket outside
        // [350, 650] is a ~7-sigma event under uniformity.
        let mut rng = StdRng::seed_from_u64(11);
        let min = Integer::from(0u32);
        let max = Integer::from(8u32);
        let mut counts = [0u32; 8];
        for _ in 0..4000 {
            let n = random_range(&min, &max, &mut rng).unwrap();
            counts[n.to_usize().unwrap()] += 1;
        }
        for (v, &c) in counts.iter().enumerate() {
            assert!(
                (350..=650).contains(&c),
                "bucket {} has count {} (expected ~500)",
                v,
                c
            );
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = StdRng::seed_from_u64(12);
        let mut b = StdRng::seed_from_u64(12);
        for bits in [2u32, 17, 64, 257] {
            assert_eq!(
                random_bits(bits, &mut a).unwrap(),
                random_bits(bits, &mut b).unwrap()
            );
        }
        let min = Integer::from(100u32);
        let max = Integer::from(1_000_000u32);
        for _ in 0..20 {
            assert_eq!(
                random_range(&min, &max, &mut a).unwrap(),
                random_range(&min, &max, &mut b).unwrap()
            );
        }
    }
}
