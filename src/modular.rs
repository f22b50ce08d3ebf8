//! # Modular — Inversion in Z/mZ
//!
//! The extended-Euclidean modular inverse used during key assembly (e.g.
//! computing an RSA private exponent). Independent of the prime-generation
//! pipeline: nothing in this crate calls it, external callers do.

use rug::Integer;

/// Computes the inverse of `a` modulo `modulus`: the unique `x` in
/// `[0, modulus)` with `a * x ≡ 1 (mod modulus)`, or `None` when no inverse
/// exists (`gcd(a, modulus) != 1`).
///
/// Iterative extended Euclid, tracking only the Bézout coefficient of `a`;
/// the gcd falls out of the remainder chain for free, so non-invertibility
/// is detected without a separate gcd pass. Intended for positive `a` and
/// `modulus > 1`; a non-positive `a` has an empty remainder chain and
/// reports `None`.
pub fn mod_inverse(a: &Integer, modulus: &Integer) -> Option<Integer> {
    let mut r = a.clone();
    let mut prev_r = modulus.clone();
    let mut d = Integer::from(1u32); // Bezout coefficient of r
    let mut v = Integer::new(); // Bezout coefficient of prev_r

    while r > 0u32 {
        let (q, rem) = prev_r.div_rem(r.clone());
        prev_r = r;
        r = rem;
        let next = v - Integer::from(&q * &d);
        v = d;
        d = next;
    }

    // The last nonzero remainder is gcd(a, modulus).
    if prev_r != 1u32 {
        return None;
    }

    v %= modulus;
    if v < 0u32 {
        v += modulus;
    }
    Some(v)
}
