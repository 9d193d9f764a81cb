// src/factor/factor_pair.rs

use num::BigInt;

/// A recovered prime factor pair with p <= q. Both members have been
/// independently certified by the primality oracle before construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FactorPair {
    pub p: BigInt,
    pub q: BigInt,
}

impl FactorPair {
    /// Orders the members so p <= q regardless of which factor the search
    /// found first.
    pub fn new(a: BigInt, b: BigInt) -> Self {
        if a <= b {
            FactorPair { p: a, q: b }
        } else {
            FactorPair { p: b, q: a }
        }
    }

    pub fn product(&self) -> BigInt {
        &self.p * &self.q
    }
}

impl std::fmt::Display for FactorPair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.p, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_members() {
        let pair = FactorPair::new(BigInt::from(10009), BigInt::from(10007));
        assert_eq!(pair.p, BigInt::from(10007));
        assert_eq!(pair.q, BigInt::from(10009));
        assert_eq!(pair.product(), BigInt::from(100160063));
        assert_eq!(pair.to_string(), "(10007, 10009)");
    }
}
