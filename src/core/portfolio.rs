//! Portfolio state management
//!
//! This module provides the `Portfolio` struct which maintains the map of
//! held positions and enforces its single structural invariant: no entry
//! ever carries a zero share count.
//!
//! The Portfolio is responsible for:
//! - Opening positions and adding shares to existing ones
//! - Reducing and closing positions on sale
//! - Removing entries the moment their share count reaches zero
//! - Providing sorted listings for display output

use crate::types::{Position, ShareCount, Symbol, TradingError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Map of held positions, keyed by symbol
///
/// Entries with a zero share count never exist; they are removed as part
/// of the mutation that zeroed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    /// Map of symbols to open positions
    positions: HashMap<Symbol, Position>,
}

impl Portfolio {
    /// Create a new, empty portfolio
    pub fn new() -> Self {
        Portfolio {
            positions: HashMap::new(),
        }
    }

    /// Whether no positions are held
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of held positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Get the position held in a symbol, if any
    pub fn get(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Add signed shares to a symbol, opening a position if none exists
    ///
    /// A new position records `fill_price` as its entry price. An existing
    /// position keeps its original entry price; only the share count moves.
    /// Adding to an opposite-signed position nets the counts, and an entry
    /// that lands exactly on zero is removed.
    pub fn add_shares(&mut self, symbol: &str, shares: ShareCount, fill_price: Decimal) {
        if shares == 0 {
            return;
        }

        let position = self
            .positions
            .entry(symbol.to_string())
            .and_modify(|position| position.shares += shares)
            .or_insert_with(|| Position::new(shares, fill_price));

        if position.shares == 0 {
            self.positions.remove(symbol);
        }
    }

    /// Reduce a long position by a positive number of shares
    ///
    /// This is the sell path: it only reduces or closes an existing long
    /// holding and never opens a short. An entry reduced to zero is removed.
    ///
    /// # Errors
    ///
    /// Returns `SymbolNotHeld` if no position exists for the symbol, or
    /// `InsufficientShares` if `shares` exceeds the held signed count
    /// (which rejects any sale against a short position).
    pub fn reduce(&mut self, symbol: &str, shares: ShareCount) -> Result<(), TradingError> {
        let position = self
            .positions
            .get_mut(symbol)
            .ok_or_else(|| TradingError::symbol_not_held(symbol))?;

        if shares > position.shares {
            return Err(TradingError::insufficient_shares(
                symbol,
                position.shares,
                shares,
            ));
        }

        position.shares -= shares;
        if position.shares == 0 {
            self.positions.remove(symbol);
        }

        Ok(())
    }

    /// Net signed share count across all held positions
    ///
    /// Longs and shorts offset each other; used as the share component of
    /// the margin exposure proxy.
    pub fn net_shares(&self) -> ShareCount {
        self.positions.values().map(|position| position.shares).sum()
    }

    /// Remove and return every held position
    pub fn drain(&mut self) -> Vec<(Symbol, Position)> {
        self.positions.drain().collect()
    }

    /// Get all positions sorted by symbol
    ///
    /// Returns symbol/position pairs in ascending symbol order for
    /// deterministic display output.
    pub fn positions_sorted(&self) -> Vec<(&str, &Position)> {
        let mut positions: Vec<(&str, &Position)> = self
            .positions
            .iter()
            .map(|(symbol, position)| (symbol.as_str(), position))
            .collect();
        positions.sort_by_key(|(symbol, _)| *symbol);
        positions
    }
}
