//! Market state management
//!
//! This module provides the `Market` struct which maintains the per-symbol
//! price table for the session.
//!
//! The Market is responsible for:
//! - Holding the fixed symbol set and current prices
//! - Serving price quotes
//! - Applying the per-round random price walk
//! - Providing sorted listings for display output

use crate::types::{Symbol, TradingError};
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Largest per-round relative price move, in basis points (10%)
const MAX_PRICE_SHOCK_BP: i64 = 1000;

/// Current tradable instruments and their per-share prices
///
/// The symbol set is fixed once the market is created; prices are mutated
/// only by the round-advance price walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    /// Map of symbols to current per-share prices
    prices: HashMap<Symbol, Decimal>,
}

impl Market {
    /// Create a market from a listing table of symbols and whole-dollar prices
    pub fn from_listings(listings: &[(&str, i64)]) -> Self {
        let prices = listings
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), Decimal::from(*price)))
            .collect();
        Market { prices }
    }

    /// Create the default session market
    ///
    /// Four fixed listings: AAPL 150, GOOGL 2500, AMZN 3300, MSFT 300.
    pub fn with_default_listings() -> Self {
        Self::from_listings(&[("AAPL", 150), ("GOOGL", 2500), ("AMZN", 3300), ("MSFT", 300)])
    }

    /// Get the current price for a symbol
    ///
    /// # Errors
    ///
    /// Returns `UnknownSymbol` if the symbol is not listed.
    pub fn quote(&self, symbol: &str) -> Result<Decimal, TradingError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| TradingError::unknown_symbol(symbol))
    }

    /// Get the current price for a symbol, if listed
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(symbol).copied()
    }

    /// Whether a symbol is listed on this market
    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    /// Highest price across all listed symbols
    ///
    /// Used as the margin exposure proxy in the round-advance accounting.
    /// Returns zero only for an empty market, which never occurs in a
    /// live session.
    pub fn max_price(&self) -> Decimal {
        self.prices.values().copied().max().unwrap_or(Decimal::ZERO)
    }

    /// Number of listed symbols
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the market has no listings
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Get all listings sorted by symbol
    ///
    /// Returns symbol/price pairs in ascending symbol order for
    /// deterministic display output.
    pub fn listings_sorted(&self) -> Vec<(&str, Decimal)> {
        let mut listings: Vec<(&str, Decimal)> = self
            .prices
            .iter()
            .map(|(symbol, price)| (symbol.as_str(), *price))
            .collect();
        listings.sort_by_key(|(symbol, _)| *symbol);
        listings
    }

    /// Apply one round of random price movement
    ///
    /// Every symbol draws its own relative change uniformly from
    /// [-10%, +10%] and is rescaled by `1 + delta`. Deltas are drawn as
    /// integer basis points so prices stay in exact decimal arithmetic.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a rescaled price would overflow;
    /// prices already updated in this pass keep their new values.
    pub fn apply_price_shocks<R: Rng>(&mut self, rng: &mut R) -> Result<(), TradingError> {
        for price in self.prices.values_mut() {
            let delta_bp = rng.gen_range(-MAX_PRICE_SHOCK_BP..=MAX_PRICE_SHOCK_BP);
            let factor = Decimal::ONE + Decimal::new(delta_bp, 4);
            *price = price
                .checked_mul(factor)
                .ok_or_else(|| TradingError::arithmetic_overflow("price shock"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn test_default_listings() {
        let market = Market::with_default_listings();
        assert_eq!(market.len(), 4);
        assert_eq!(market.quote("AAPL").unwrap(), Decimal::from(150));
        assert_eq!(market.quote("GOOGL").unwrap(), Decimal::from(2500));
        assert_eq!(market.quote("AMZN").unwrap(), Decimal::from(3300));
        assert_eq!(market.quote("MSFT").unwrap(), Decimal::from(300));
    }

    #[test]
    fn test_quote_unknown_symbol() {
        let market = Market::with_default_listings();
        let result = market.quote("TSLA");

        assert_eq!(result, Err(TradingError::unknown_symbol("TSLA")));
    }

    #[test]
    fn test_max_price_picks_highest_listing() {
        let market = Market::with_default_listings();
        assert_eq!(market.max_price(), Decimal::from(3300));
    }

    #[test]
    fn test_max_price_empty_market_is_zero() {
        let market = Market::from_listings(&[]);
        assert_eq!(market.max_price(), Decimal::ZERO);
    }

    #[test]
    fn test_listings_sorted_by_symbol() {
        let market = Market::with_default_listings();
        let symbols: Vec<&str> = market
            .listings_sorted()
            .into_iter()
            .map(|(symbol, _)| symbol)
            .collect();

        assert_eq!(symbols, vec!["AAPL", "AMZN", "GOOGL", "MSFT"]);
    }

    #[rstest]
    #[case::seed_zero(0)]
    #[case::seed_one(1)]
    #[case::seed_large(u64::MAX)]
    fn test_price_shocks_stay_within_ten_percent(#[case] seed: u64) {
        let mut market = Market::with_default_listings();
        let before = market.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        market.apply_price_shocks(&mut rng).unwrap();

        for (symbol, old_price) in before.listings_sorted() {
            let new_price = market.quote(symbol).unwrap();
            let lower = old_price * Decimal::new(9, 1);
            let upper = old_price * Decimal::new(11, 1);
            assert!(
                new_price >= lower && new_price <= upper,
                "{} moved from {} to {}, outside [-10%, +10%]",
                symbol,
                old_price,
                new_price
            );
        }
    }

    #[test]
    fn test_price_shocks_keep_symbol_set_fixed() {
        let mut market = Market::with_default_listings();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            market.apply_price_shocks(&mut rng).unwrap();
        }

        assert_eq!(market.len(), 4);
        for symbol in ["AAPL", "GOOGL", "AMZN", "MSFT"] {
            assert!(market.contains(symbol));
        }
    }
}
