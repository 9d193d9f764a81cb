// src/phase_math/precision.rs

use num::{BigInt, BigRational, ToPrimitive};

/// Minimum decimal precision used when deriving a context from a modulus.
pub const DEFAULT_PRECISION_DIGITS: u32 = 100;

/// Guard digits added on top of the magnitude- and window-driven estimate.
const GUARD_DIGITS: u32 = 32;

/// An explicit numeric context for the phase mapping.
///
/// Holds the golden ratio phi = (1 + sqrt(5)) / 2 truncated to a fixed number
/// of decimal digits, as an exact rational. Every mapping call takes the
/// context by reference; phase values computed under contexts with different
/// digit counts are not comparable, so a single context must be used for the
/// whole of one search.
#[derive(Debug, Clone)]
pub struct PrecisionContext {
    digits: u32,
    phi: BigRational,
    phi_f64: f64,
}

impl PrecisionContext {
    /// Builds a context with phi truncated to `digits` decimal digits.
    ///
    /// phi_D = (10^D + isqrt(5 * 10^(2D))) / (2 * 10^D), computed with exact
    /// integer arithmetic. `digits` must be at least 1.
    pub fn new(digits: u32) -> Self {
        let digits = digits.max(1);
        let ten_d = BigInt::from(10).pow(digits);
        let sqrt5_scaled = (BigInt::from(5) * &ten_d * &ten_d).sqrt();
        let phi = BigRational::new(&ten_d + sqrt5_scaled, BigInt::from(2) * ten_d);
        // 1 < phi < 2, so the conversion cannot fail or overflow.
        let phi_f64 = phi.to_f64().unwrap_or(1.618033988749895);
        PrecisionContext { digits, phi, phi_f64 }
    }

    /// Derives a digit count suitable for searching around the modulus `n`:
    /// the decimal magnitude of n plus enough digits to resolve the
    /// acceptance window `eps`, floored at [`DEFAULT_PRECISION_DIGITS`].
    pub fn for_modulus(n: &BigInt, eps: f64) -> Self {
        let magnitude = n.magnitude().to_string().len() as u32;
        let window_digits = if eps > 0.0 && eps < 1.0 {
            (-eps.log10()).ceil() as u32
        } else {
            0
        };
        let digits = (magnitude + window_digits + GUARD_DIGITS).max(DEFAULT_PRECISION_DIGITS);
        Self::new(digits)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The truncated golden ratio as an exact rational a/b.
    pub fn phi(&self) -> &BigRational {
        &self.phi
    }

    /// The truncated golden ratio rounded to f64, used only for scaling the
    /// warped fraction back onto [0, phi).
    pub fn phi_f64(&self) -> f64 {
        self.phi_f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phi_matches_known_value() {
        let ctx = PrecisionContext::new(50);
        assert!((ctx.phi_f64() - 1.618033988749895).abs() < 1e-12);
    }

    #[test]
    fn phi_satisfies_defining_identity() {
        // phi^2 - phi - 1 = 0 up to the truncation error of the context.
        let ctx = PrecisionContext::new(40);
        let phi = ctx.phi();
        let residual = (phi * phi - phi - num::BigRational::from(num::BigInt::from(1)))
            .to_f64()
            .unwrap()
            .abs();
        assert!(residual < 1e-39, "residual {} too large", residual);
    }

    #[test]
    fn for_modulus_scales_with_magnitude() {
        let small = PrecisionContext::for_modulus(&BigInt::from(100160063), 0.32);
        assert_eq!(small.digits(), DEFAULT_PRECISION_DIGITS);

        let big = BigInt::from(7) << 2048usize;
        let ctx = PrecisionContext::for_modulus(&big, 0.32);
        assert!(ctx.digits() > 600, "digits {} should track magnitude", ctx.digits());
    }
}
