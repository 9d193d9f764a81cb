// src/integer_math/prime_gen.rs

use log::debug;
use num::bigint::Sign;
use num::BigInt;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::SearchError;
use crate::integer_math::primality::MillerRabin;

/// Floor for the per-call draw guard; the expected number of draws for a
/// b-bit prime is about 0.35 * b, so the guard never fires in practice.
const MIN_DRAW_GUARD: u64 = 4096;
const DRAW_GUARD_PER_BIT: u64 = 64;

/// Produces cryptographically unpredictable primes of an exact bit length.
///
/// Candidate bytes come straight from the OS entropy source; a failure to
/// read entropy is a hard error for the whole search, never silently
/// downgraded to a weaker generator. Certification is delegated to
/// [`MillerRabin`].
pub struct PrimeSampler {
    certifier: MillerRabin,
    max_draws: Option<u64>,
}

impl PrimeSampler {
    pub fn new() -> Result<Self, SearchError> {
        Ok(PrimeSampler { certifier: MillerRabin::new()?, max_draws: None })
    }

    /// Overrides the automatic draw guard of max(4096, 64 * bits).
    pub fn with_draw_guard(max_draws: u64) -> Result<Self, SearchError> {
        Ok(PrimeSampler { certifier: MillerRabin::new()?, max_draws: Some(max_draws) })
    }

    /// One random odd integer with bit length exactly `bits`: uniform bytes,
    /// top bit forced so the length cannot fall short, bottom bit forced
    /// since even numbers above 2 are never prime.
    pub fn random_odd_candidate(&mut self, bits: u64) -> Result<BigInt, SearchError> {
        if bits < 2 {
            return Err(SearchError::InvalidBitLength(bits));
        }
        let num_bytes = ((bits + 7) / 8) as usize;
        let mut buffer = vec![0u8; num_bytes];
        OsRng
            .try_fill_bytes(&mut buffer)
            .map_err(|e| SearchError::Entropy(e.to_string()))?;
        let excess = num_bytes as u64 * 8 - bits;
        buffer[0] &= 0xff >> excess;
        let mut candidate = BigInt::from_bytes_be(Sign::Plus, &buffer);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);
        Ok(candidate)
    }

    /// Draws candidates until one certifies prime. The loop is capped by the
    /// draw guard; hitting the cap is reported as a distinct stall error so
    /// callers with latency requirements see it rather than hang.
    pub fn random_prime(&mut self, bits: u64) -> Result<BigInt, SearchError> {
        if bits < 2 {
            return Err(SearchError::InvalidBitLength(bits));
        }
        let guard = self
            .max_draws
            .unwrap_or_else(|| MIN_DRAW_GUARD.max(bits.saturating_mul(DRAW_GUARD_PER_BIT)));
        for draw in 0..guard {
            let candidate = self.random_odd_candidate(bits)?;
            if self.certifier.is_probable_prime(&candidate) {
                debug!("{}-bit prime found after {} draws", bits, draw + 1);
                return Ok(candidate);
            }
        }
        Err(SearchError::PrimeSearchStalled { bits, draws: guard })
    }

    /// Re-exposes the certification oracle so the search controller can
    /// verify cofactors with the same error rate as the candidates.
    pub fn is_probable_prime(&mut self, value: &BigInt) -> bool {
        self.certifier.is_probable_prime(value)
    }
}
