//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `position`: Position and portfolio-related types
//! - `config`: Session constants
//! - `error`: Error types for the trading engine

pub mod config;
pub mod error;
pub mod position;

pub use config::SessionConfig;
pub use error::TradingError;
pub use position::{EarningsReport, Position, ShareCount, Symbol};
