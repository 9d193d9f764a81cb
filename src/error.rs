// src/error.rs

use num::BigInt;
use thiserror::Error;

/// Failures of the factor search itself. Exhaustion of the attempt budget is
/// not among them: running out of budget is a normal negative outcome and is
/// reported through `CrackOutcome::Exhausted`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("modulus must be an integer greater than 1, got {0}")]
    ModulusOutOfRange(BigInt),

    #[error("modulus bit length {0} is too small to derive a target factor size")]
    ModulusTooSmall(u64),

    #[error("modulus is itself prime; nothing to factor")]
    ModulusPrime,

    #[error("warp exponent must be positive and finite, got {0}")]
    InvalidWarpExponent(f64),

    #[error("acceptance window must lie in (0, 0.5), got {0}")]
    InvalidWindow(f64),

    #[error("attempt budget must be at least 1")]
    InvalidBudget,

    #[error("prime candidate bit length must be at least 2, got {0}")]
    InvalidBitLength(u64),

    #[error("gave up after {draws} draws without finding a {bits}-bit prime")]
    PrimeSearchStalled { bits: u64, draws: u64 },

    #[error("entropy source failure: {0}")]
    Entropy(String),

    #[error("worker pool could not be built: {0}")]
    ThreadPool(String),
}
