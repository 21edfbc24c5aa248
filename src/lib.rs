//! Trading Simulator Library
//! # Overview
//!
//! This library provides a single-player, turn-based stock-trading
//! simulation driven through a text menu
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Position, SessionConfig, etc.)
//! - [`cli`] - CLI argument parsing and the interactive menu loop
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Session orchestration and state-transition rules
//!   - [`core::market`] - Price table and the per-round random walk
//!   - [`core::portfolio`] - Held positions and share-count bookkeeping
//!
//! # Session Rules
//!
//! A session holds a cash balance, a fixed set of market listings, and a
//! portfolio of signed positions:
//!
//! - **Buy**: Debit cash by `shares * price`, limited by buying power
//!   (`max(0, cash) * margin multiplier`)
//! - **Sell**: Credit cash at the market price; only reduces or closes an
//!   existing long holding
//! - **Deposit/Withdraw**: Direct cash adjustments with validation
//! - **Next round**: Compounds idle interest, runs the margin check (forced
//!   liquidation or interest debit), then moves every price by an
//!   independent random step in [-10%, +10%]
//!
//! # Determinism
//!
//! The engine is generic over a [`rand::Rng`] source injected at
//! construction, so sessions can be replayed exactly under a fixed seed.

// Module declarations
pub mod cli;
pub mod core;
pub mod types;

pub use crate::core::{Market, Portfolio, TradingEngine};
pub use crate::types::{
    EarningsReport, Position, SessionConfig, ShareCount, Symbol, TradingError,
};
