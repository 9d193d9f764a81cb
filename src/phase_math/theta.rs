// src/phase_math/theta.rs

use log::trace;
use num::{BigInt, BigRational, Integer, ToPrimitive};

use crate::phase_math::precision::PrecisionContext;

// Largest f64 strictly below 1.0; keeps the half-open ranges honest when a
// fraction rounds up during conversion or exponentiation.
const ONE_EXCLUSIVE: f64 = 1.0 - f64::EPSILON;

/// Exact normalized reduction f = (x mod phi) / phi in [0, 1).
///
/// With phi = a/b, x mod phi = x - floor(x*b/a)*(a/b), so f reduces to
/// ((x*b) mod a) / a. The whole computation is integer arithmetic; inputs
/// thousands of bits wide lose nothing here.
pub fn phase_fraction(ctx: &PrecisionContext, x: &BigInt) -> BigRational {
    let a = ctx.phi().numer();
    let b = ctx.phi().denom();
    let reduced = (x * b).mod_floor(a);
    BigRational::new(reduced, a.clone())
}

/// Normalized phase f^k in [0, 1). This is the value the search compares:
/// the acceptance window lives on the unit circle.
///
/// The warp exponentiation runs in f64 on the exactly-reduced fraction; the
/// base is in [0, 1), so the result is well-defined for any finite k and
/// resolves the window far below its width. Deterministic for a fixed
/// (x, k, digits).
pub fn normalized_phase(ctx: &PrecisionContext, x: &BigInt, k: f64) -> f64 {
    let f = phase_fraction(ctx, x)
        .to_f64()
        .unwrap_or(0.0)
        .min(ONE_EXCLUSIVE);
    let warped = f.powf(k).min(ONE_EXCLUSIVE);
    trace!("normalized_phase: f = {:.17}, f^{} = {:.17}", f, k, warped);
    warped
}

/// Theta mapping: phi * f^k in [0, phi).
pub fn phase(ctx: &PrecisionContext, x: &BigInt, k: f64) -> f64 {
    ctx.phi_f64() * normalized_phase(ctx, x, k)
}

/// Minimal wraparound distance between two points on the [0, 1) circle,
/// always in [0, 0.5]. 0.99 and 0.01 are 0.02 apart, not 0.98.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    ((a - b + 0.5).rem_euclid(1.0) - 0.5).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_maps_to_zero() {
        let ctx = PrecisionContext::new(50);
        assert_eq!(phase(&ctx, &BigInt::from(0), 0.45), 0.0);
        assert_eq!(normalized_phase(&ctx, &BigInt::from(0), 1.0), 0.0);
    }

    #[test]
    fn circular_distance_wraps() {
        assert!((circular_distance(0.99, 0.01) - 0.02).abs() < 1e-12);
        assert!((circular_distance(0.01, 0.99) - 0.02).abs() < 1e-12);
        assert!((circular_distance(0.25, 0.75) - 0.5).abs() < 1e-12);
        assert_eq!(circular_distance(0.4, 0.4), 0.0);
    }

    #[test]
    fn fraction_is_exact_and_bounded() {
        let ctx = PrecisionContext::new(60);
        for x in 1..500u32 {
            let f = phase_fraction(&ctx, &BigInt::from(x));
            assert!(f >= BigRational::from(BigInt::from(0)), "f < 0 at x = {}", x);
            assert!(f < BigRational::from(BigInt::from(1)), "f >= 1 at x = {}", x);
        }
    }
}
