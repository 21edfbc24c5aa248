//! Session configuration for the trading simulator
//!
//! Defines the constants that are fixed for the lifetime of a session:
//! the starting cash balance, margin parameters, and the range the idle
//! interest rate is drawn from at session start.

use rust_decimal::Decimal;

/// Default starting cash balance
pub const DEFAULT_STARTING_BALANCE: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Lower bound of the idle interest rate draw, in basis points (1.38%)
pub const DEFAULT_IDLE_RATE_MIN_BP: i64 = 138;

/// Upper bound of the idle interest rate draw, in basis points (5.88%)
pub const DEFAULT_IDLE_RATE_MAX_BP: i64 = 588;

/// Session constants, fixed for the session lifetime
///
/// The idle interest rate itself is not stored here; it is drawn once from
/// `[idle_rate_min_bp, idle_rate_max_bp]` when the engine is created and
/// then held by the engine for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Cash balance at session start
    pub starting_balance: Decimal,

    /// Minimum capital ratio used in the margin-call check
    ///
    /// A round forces liquidation when the computed margin balance falls
    /// below `minimum_capital_ratio * cash`.
    pub minimum_capital_ratio: Decimal,

    /// Per-round interest rate charged on the margin balance
    pub margin_interest_rate: Decimal,

    /// Multiplier applied to non-negative cash to derive buying power
    pub margin_multiplier: Decimal,

    /// Lower bound of the idle interest rate draw, in basis points
    pub idle_rate_min_bp: i64,

    /// Upper bound of the idle interest rate draw, in basis points
    pub idle_rate_max_bp: i64,
}

impl SessionConfig {
    /// Create a configuration with a custom starting balance
    ///
    /// A non-positive balance falls back to the default with a warning on
    /// stderr, keeping the session playable rather than failing startup.
    pub fn with_starting_balance(starting_balance: Decimal) -> Self {
        let starting_balance = if starting_balance <= Decimal::ZERO {
            eprintln!(
                "Warning: starting balance {} is not positive, using default {}",
                starting_balance, DEFAULT_STARTING_BALANCE
            );
            DEFAULT_STARTING_BALANCE
        } else {
            starting_balance
        };

        SessionConfig {
            starting_balance,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            starting_balance: DEFAULT_STARTING_BALANCE,
            // 0.05
            minimum_capital_ratio: Decimal::new(5, 2),
            // 0.015
            margin_interest_rate: Decimal::new(15, 3),
            // 1.05
            margin_multiplier: Decimal::new(105, 2),
            idle_rate_min_bp: DEFAULT_IDLE_RATE_MIN_BP,
            idle_rate_max_bp: DEFAULT_IDLE_RATE_MAX_BP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_values() {
        let config = SessionConfig::default();
        assert_eq!(config.starting_balance, Decimal::from(10000));
        assert_eq!(config.minimum_capital_ratio, Decimal::new(5, 2));
        assert_eq!(config.margin_interest_rate, Decimal::new(15, 3));
        assert_eq!(config.margin_multiplier, Decimal::new(105, 2));
        assert_eq!(config.idle_rate_min_bp, 138);
        assert_eq!(config.idle_rate_max_bp, 588);
    }

    #[rstest]
    #[case::custom_balance(Decimal::from(2500), Decimal::from(2500))]
    #[case::zero_falls_back(Decimal::ZERO, DEFAULT_STARTING_BALANCE)]
    #[case::negative_falls_back(Decimal::from(-100), DEFAULT_STARTING_BALANCE)]
    fn test_with_starting_balance(#[case] requested: Decimal, #[case] expected: Decimal) {
        let config = SessionConfig::with_starting_balance(requested);
        assert_eq!(config.starting_balance, expected);
        // The rest of the configuration keeps its defaults
        assert_eq!(config.margin_multiplier, Decimal::new(105, 2));
    }
}
