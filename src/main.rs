//! Trading Simulator CLI
//!
//! Interactive console front-end for the trading engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --seed 42
//! cargo run -- --balance 2500 --seed 42
//! ```
//!
//! The program builds a fresh session (optionally seeded for reproducible
//! price movement) and runs the menu loop over stdin/stdout until the
//! player quits.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (terminal I/O failure)

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process;
use trading_sim::cli;
use trading_sim::TradingEngine;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let config = args.to_session_config();

    // Seeded runs replay the same interest draw and price walk
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = TradingEngine::new(config, rng);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    if let Err(e) = cli::menu::run(&mut engine, &mut input, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
