//! Error types for the trading simulator
//!
//! This module defines all error types that can occur while operating on the
//! trading engine. Errors are designed to be descriptive and user-friendly
//! for console output.
//!
//! Every error is locally recoverable: the rejected operation leaves engine
//! state untouched and the session continues.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the trading engine
///
/// This enum represents all possible errors that can occur while mutating
/// or querying the trading engine. Each variant includes relevant context
/// to help the player understand why an operation was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradingError {
    /// The requested symbol is not listed on the market
    ///
    /// The market symbol set is fixed for the session, so this only occurs
    /// on player typos or unlisted symbols.
    #[error("Unknown symbol '{symbol}'")]
    UnknownSymbol {
        /// The symbol that was not found
        symbol: String,
    },

    /// Order cost exceeds the cash-derived buying power
    ///
    /// Buying power is `max(0, cash) * margin multiplier`; the order is
    /// rejected without touching the cash balance or portfolio.
    #[error("Insufficient buying power: cost {cost}, buying power {available}")]
    InsufficientBuyingPower {
        /// Total cost of the rejected order
        cost: Decimal,
        /// Buying power at the time of the order
        available: Decimal,
    },

    /// More shares requested than the position holds
    ///
    /// Selling can only reduce or close an existing long holding; it never
    /// opens a short.
    #[error("Insufficient shares of {symbol}: held {held}, requested {requested}")]
    InsufficientShares {
        /// The symbol being sold
        symbol: String,
        /// Signed share count currently held
        held: i64,
        /// Requested sale size
        requested: i64,
    },

    /// The symbol has no entry in the portfolio
    #[error("No position held in {symbol}")]
    SymbolNotHeld {
        /// The symbol that is not held
        symbol: String,
    },

    /// Amount or share count is not a positive value
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal exceeds the current cash balance
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Current cash balance
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the cash balance and portfolio
    /// consistent.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

// Helper functions for creating common errors

impl TradingError {
    /// Create an UnknownSymbol error
    pub fn unknown_symbol(symbol: &str) -> Self {
        TradingError::UnknownSymbol {
            symbol: symbol.to_string(),
        }
    }

    /// Create an InsufficientBuyingPower error
    pub fn insufficient_buying_power(cost: Decimal, available: Decimal) -> Self {
        TradingError::InsufficientBuyingPower { cost, available }
    }

    /// Create an InsufficientShares error
    pub fn insufficient_shares(symbol: &str, held: i64, requested: i64) -> Self {
        TradingError::InsufficientShares {
            symbol: symbol.to_string(),
            held,
            requested,
        }
    }

    /// Create a SymbolNotHeld error
    pub fn symbol_not_held(symbol: &str) -> Self {
        TradingError::SymbolNotHeld {
            symbol: symbol.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TradingError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        TradingError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        TradingError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}
