/// Fixed gas-price premium over the queried base price.
///
/// Paying slightly above the going rate narrows confirmation latency
/// variance. The premium is a tunable constant, never derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasPolicy {
    pub premium_percent: u64,
}

impl GasPolicy {
    /// Default premium: 10%.
    pub const DEFAULT_PREMIUM_PERCENT: u64 = 10;

    /// Policy with an explicit premium percentage.
    pub const fn with_premium(premium_percent: u64) -> Self {
        Self { premium_percent }
    }

    /// Apply the premium to a base price.
    pub fn apply(&self, base_price: u128) -> u128 {
        base_price.saturating_add(
            base_price
                .saturating_mul(self.premium_percent as u128)
                .saturating_div(100),
        )
    }
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self::with_premium(Self::DEFAULT_PREMIUM_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_premium_is_ten_percent() {
        assert_eq!(GasPolicy::default().apply(100), 110);
        assert_eq!(GasPolicy::default().apply(1_000_000_000), 1_100_000_000);
    }

    #[test]
    fn zero_premium_is_identity() {
        assert_eq!(GasPolicy::with_premium(0).apply(12345), 12345);
    }

    #[test]
    fn rounds_down() {
        // 10% of 15 is 1.5; integer math keeps 1.
        assert_eq!(GasPolicy::default().apply(15), 16);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let policy = GasPolicy::with_premium(100);
        assert_eq!(policy.apply(u128::MAX), u128::MAX);
    }
}
