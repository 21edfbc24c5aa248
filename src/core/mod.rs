//! Core business logic module
//!
//! This module contains the core simulation components:
//! - `engine` - Session orchestration and state-transition rules
//! - `market` - Price table and the per-round random walk
//! - `portfolio` - Held positions and share-count bookkeeping

pub mod engine;
pub mod market;
pub mod portfolio;

pub use engine::TradingEngine;
pub use market::Market;
pub use portfolio::Portfolio;
