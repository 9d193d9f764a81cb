// src/integer_math/primality.rs

use lazy_static::lazy_static;
use num::bigint::Sign;
use num::{BigInt, Integer, One, Zero};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SearchError;

/// Default number of Miller-Rabin rounds. At 40 random bases the
/// false-positive probability is below 4^-40; anything much lower than ~20
/// rounds is not an acceptable certification for this search.
pub const DEFAULT_MR_ROUNDS: u32 = 40;

/// Trial-division bound. Any candidate below TRIAL_DIVISION_BOUND^2 that
/// survives the table is prime outright.
const TRIAL_DIVISION_BOUND: u64 = 1000;

lazy_static! {
    static ref SMALL_PRIMES: Vec<u64> = sieve_below(TRIAL_DIVISION_BOUND);
}

fn sieve_below(limit: u64) -> Vec<u64> {
    let limit = limit as usize;
    let mut composite = vec![false; limit];
    let mut primes = Vec::new();
    for n in 2..limit {
        if !composite[n] {
            primes.push(n as u64);
            let mut multiple = n * n;
            while multiple < limit {
                composite[multiple] = true;
                multiple += n;
            }
        }
    }
    primes
}

/// Probabilistic primality certification: trial division by every prime
/// below 1000, then strong probable-prime tests to uniformly random bases.
///
/// The random bases come from a ChaCha8 stream seeded once from the OS
/// entropy source, so verdicts are not reproducible across instances; the
/// mapping layer is where determinism matters, not here.
pub struct MillerRabin {
    rounds: u32,
    rng: ChaCha8Rng,
}

impl MillerRabin {
    pub fn new() -> Result<Self, SearchError> {
        Self::with_rounds(DEFAULT_MR_ROUNDS)
    }

    pub fn with_rounds(rounds: u32) -> Result<Self, SearchError> {
        let rng = ChaCha8Rng::try_from_os_rng()
            .map_err(|e| SearchError::Entropy(e.to_string()))?;
        Ok(MillerRabin { rounds: rounds.max(1), rng })
    }

    pub fn is_probable_prime(&mut self, input: &BigInt) -> bool {
        let two = BigInt::from(2);
        if input < &two {
            return false;
        }
        for &sp in SMALL_PRIMES.iter() {
            let sp = BigInt::from(sp);
            if input == &sp {
                return true;
            }
            if (input % &sp).is_zero() {
                return false;
            }
        }
        // Survived division by every prime below the bound: below bound^2
        // there is no factor left to find.
        if input < &BigInt::from(TRIAL_DIVISION_BOUND * TRIAL_DIVISION_BOUND) {
            return true;
        }

        // input - 1 = d * 2^s with d odd
        let one = BigInt::one();
        let minus_one = input - &one;
        let mut d = minus_one.clone();
        let mut s = 0u32;
        while d.is_even() {
            d /= 2;
            s += 1;
        }

        // Bases drawn uniformly from [2, input - 2].
        let base_span = input - BigInt::from(4);
        for _ in 0..self.rounds {
            let a = &two + self.random_below(&base_span);
            let mut x = a.modpow(&d, input);
            if x == one || x == minus_one {
                continue;
            }
            let mut is_witness = true;
            for _ in 1..s {
                x = x.modpow(&two, input);
                if x == minus_one {
                    is_witness = false;
                    break;
                }
            }
            if is_witness {
                return false;
            }
        }
        true
    }

    /// Uniform value in [0, limit) by rejection sampling over the byte
    /// length of `limit`. `limit` must be positive.
    fn random_below(&mut self, limit: &BigInt) -> BigInt {
        let limit_bytes = limit.to_bytes_be().1;
        let mut buffer = vec![0u8; limit_bytes.len()];
        loop {
            self.rng.fill_bytes(&mut buffer);
            let result = BigInt::from_bytes_be(Sign::Plus, &buffer);
            if &result < limit {
                return result;
            }
        }
    }
}
