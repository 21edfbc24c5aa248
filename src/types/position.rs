//! Position-related types for the trading simulator
//!
//! This module defines the Position structure and related identifiers
//! used to track a player's holdings.

use rust_decimal::Decimal;

/// Stock ticker symbol
///
/// Symbols are uppercase strings such as "AAPL" or "GOOGL". The market
/// symbol set is fixed for the session lifetime.
pub type Symbol = String;

/// Signed share count
///
/// Positive counts are long positions, negative counts are short positions.
/// A count of zero never appears in the portfolio; such entries are removed
/// the moment they reach zero.
pub type ShareCount = i64;

/// A single held position in the portfolio
///
/// Tracks the signed share count and the price at which the position was
/// opened. The entry price is recorded once at open and is deliberately
/// not re-averaged when shares are added to an existing position.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Signed share count (> 0 long, < 0 short, never zero)
    pub shares: ShareCount,

    /// Price per share at which the position was opened
    ///
    /// Remains fixed for the life of the position, even when the share
    /// count is later increased at a different market price. Short
    /// positions are closed at this price rather than the market price.
    pub entry_price: Decimal,
}

impl Position {
    /// Create a new position with the given share count and entry price
    pub fn new(shares: ShareCount, entry_price: Decimal) -> Self {
        Position {
            shares,
            entry_price,
        }
    }

    /// Whether this is a long position (positive share count)
    pub fn is_long(&self) -> bool {
        self.shares > 0
    }

    /// Whether this is a short position (negative share count)
    pub fn is_short(&self) -> bool {
        self.shares < 0
    }
}

/// Snapshot of portfolio value versus cost
///
/// Produced by the engine's earnings report: a pure read over the current
/// portfolio that never mutates state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsReport {
    /// Sum of signed share counts times current market prices
    pub total_value: Decimal,

    /// Sum of absolute share counts times entry prices
    pub total_cost: Decimal,

    /// Profit and loss: total value minus total cost
    pub pnl: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_shares_and_entry_price() {
        let position = Position::new(10, Decimal::from(150));
        assert_eq!(position.shares, 10);
        assert_eq!(position.entry_price, Decimal::from(150));
    }

    #[test]
    fn test_long_and_short_classification() {
        assert!(Position::new(5, Decimal::ONE).is_long());
        assert!(!Position::new(5, Decimal::ONE).is_short());
        assert!(Position::new(-5, Decimal::ONE).is_short());
        assert!(!Position::new(-5, Decimal::ONE).is_long());
    }
}
