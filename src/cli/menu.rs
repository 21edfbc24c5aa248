//! Interactive menu loop
//!
//! The presentation layer for the trading engine: a text menu with ten
//! options mapped one-to-one onto engine operations. This layer owns all
//! console concerns the engine deliberately excludes: prompting, numeric
//! input parsing, and two-decimal money formatting.
//!
//! The loop is generic over `BufRead`/`Write` so complete sessions can be
//! driven from in-memory buffers in tests. Engine errors are printed and
//! the session continues; only I/O failures propagate.

use crate::core::TradingEngine;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

/// Run the menu loop until the player quits or input ends
pub fn run<R, I, W>(engine: &mut TradingEngine<R>, input: &mut I, output: &mut W) -> io::Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    loop {
        write_menu(output)?;
        let Some(choice) = prompt_line(input, output, "Enter your choice (1-10): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => view_prices(engine, output)?,
            "2" => buy_flow(engine, input, output)?,
            "3" => sell_flow(engine, input, output)?,
            "4" => view_portfolio(engine, output)?,
            "5" => view_balance(engine, output)?,
            "6" => deposit_flow(engine, input, output)?,
            "7" => withdraw_flow(engine, input, output)?,
            "8" => view_earnings(engine, output)?,
            "9" => next_round(engine, output)?,
            "10" => {
                writeln!(output, "Thanks for playing. Goodbye!")?;
                break;
            }
            _ => writeln!(
                output,
                "Invalid choice. Please enter a number between 1 and 10."
            )?,
        }
    }

    Ok(())
}

fn write_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "\nStock Market Menu:")?;
    writeln!(output, "1. View Stock Prices")?;
    writeln!(output, "2. Buy Stock")?;
    writeln!(output, "3. Sell Stock")?;
    writeln!(output, "4. View Portfolio")?;
    writeln!(output, "5. View Cash Balance and Buying Power")?;
    writeln!(output, "6. Deposit Funds")?;
    writeln!(output, "7. Withdraw Funds")?;
    writeln!(output, "8. View Earnings/Losses")?;
    writeln!(output, "9. Next Round")?;
    writeln!(output, "10. Quit")
}

/// Print a prompt and read one trimmed line
///
/// Returns `None` at end of input, which callers treat as an aborted
/// action (and the main loop treats as quitting).
fn prompt_line<I: BufRead, W: Write>(
    input: &mut I,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a positive monetary amount
///
/// Malformed numbers are a presentation concern: a message is printed and
/// the action is aborted before it reaches the engine.
fn prompt_amount<I: BufRead, W: Write>(
    input: &mut I,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<Decimal>> {
    let Some(raw) = prompt_line(input, output, prompt)? else {
        return Ok(None);
    };
    match raw.parse::<Decimal>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln!(output, "Invalid number: '{}'.", raw)?;
            Ok(None)
        }
    }
}

/// Prompt for a whole share count
fn prompt_shares<I: BufRead, W: Write>(
    input: &mut I,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<u32>> {
    let Some(raw) = prompt_line(input, output, prompt)? else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(shares) => Ok(Some(shares)),
        Err(_) => {
            writeln!(output, "Invalid share count: '{}'.", raw)?;
            Ok(None)
        }
    }
}

fn view_prices<R: Rng, W: Write>(engine: &TradingEngine<R>, output: &mut W) -> io::Result<()> {
    writeln!(output, "\nStock Prices:")?;
    for (symbol, price) in engine.market().listings_sorted() {
        writeln!(output, "{}: ${:.2}", symbol, price)?;
    }
    Ok(())
}

fn buy_flow<R: Rng, I: BufRead, W: Write>(
    engine: &mut TradingEngine<R>,
    input: &mut I,
    output: &mut W,
) -> io::Result<()> {
    view_prices(engine, output)?;

    let Some(symbol) = prompt_line(input, output, "Enter the stock symbol you want to buy: ")?
    else {
        return Ok(());
    };
    let symbol = symbol.to_uppercase();

    let price = match engine.quote(&symbol) {
        Ok(price) => price,
        Err(e) => {
            writeln!(output, "{}", e)?;
            return Ok(());
        }
    };

    let max_shares = engine
        .buying_power()
        .checked_div(price)
        .and_then(|shares| shares.floor().to_u64())
        .unwrap_or(0);
    writeln!(output, "Current price: ${:.2}", price)?;
    writeln!(output, "You can buy up to {} shares.", max_shares)?;

    let Some(shares) = prompt_shares(input, output, "Enter the number of shares to buy: ")? else {
        return Ok(());
    };

    match engine.buy(&symbol, shares) {
        Ok(cost) => writeln!(
            output,
            "You bought {} shares of {} for ${:.2}.",
            shares, symbol, cost
        ),
        Err(e) => writeln!(output, "{}", e),
    }
}

fn sell_flow<R: Rng, I: BufRead, W: Write>(
    engine: &mut TradingEngine<R>,
    input: &mut I,
    output: &mut W,
) -> io::Result<()> {
    if engine.portfolio().is_empty() {
        writeln!(output, "Your portfolio is empty.")?;
        return Ok(());
    }

    writeln!(output, "\nYour Portfolio:")?;
    for (symbol, position) in engine.portfolio().positions_sorted() {
        writeln!(output, "{}: {} shares", symbol, position.shares)?;
    }

    let Some(symbol) = prompt_line(input, output, "Enter the stock symbol you want to sell: ")?
    else {
        return Ok(());
    };
    let symbol = symbol.to_uppercase();

    let Some(position) = engine.portfolio().get(&symbol) else {
        writeln!(output, "No position held in {}", symbol)?;
        return Ok(());
    };
    let held = position.shares;

    match engine.quote(&symbol) {
        Ok(price) => writeln!(output, "Current price: ${:.2}", price)?,
        Err(e) => {
            writeln!(output, "{}", e)?;
            return Ok(());
        }
    }
    writeln!(output, "You hold {} shares.", held)?;

    let Some(shares) = prompt_shares(input, output, "Enter the number of shares to sell: ")?
    else {
        return Ok(());
    };

    match engine.sell(&symbol, shares) {
        Ok(proceeds) => writeln!(
            output,
            "You sold {} shares of {} for ${:.2}.",
            shares, symbol, proceeds
        ),
        Err(e) => writeln!(output, "{}", e),
    }
}

fn view_portfolio<R: Rng, W: Write>(engine: &TradingEngine<R>, output: &mut W) -> io::Result<()> {
    writeln!(output, "\nYour Portfolio:")?;
    if engine.portfolio().is_empty() {
        writeln!(output, "Empty.")?;
        return Ok(());
    }
    for (symbol, position) in engine.portfolio().positions_sorted() {
        writeln!(
            output,
            "{}: {} shares, Entry Price: ${:.2}",
            symbol, position.shares, position.entry_price
        )?;
    }
    Ok(())
}

fn view_balance<R: Rng, W: Write>(engine: &TradingEngine<R>, output: &mut W) -> io::Result<()> {
    // Display-only clamp; the stored balance may be negative
    let shown = engine.cash_balance().max(Decimal::ZERO);
    writeln!(output, "\nCash Balance: ${:.2}", shown)?;
    writeln!(output, "Buying Power: ${:.2}", engine.buying_power())
}

fn deposit_flow<R: Rng, I: BufRead, W: Write>(
    engine: &mut TradingEngine<R>,
    input: &mut I,
    output: &mut W,
) -> io::Result<()> {
    let Some(amount) = prompt_amount(input, output, "Enter the amount to deposit: ")? else {
        return Ok(());
    };
    match engine.deposit(amount) {
        Ok(()) => writeln!(output, "Successfully deposited ${:.2}.", amount),
        Err(e) => writeln!(output, "{}", e),
    }
}

fn withdraw_flow<R: Rng, I: BufRead, W: Write>(
    engine: &mut TradingEngine<R>,
    input: &mut I,
    output: &mut W,
) -> io::Result<()> {
    let Some(amount) = prompt_amount(input, output, "Enter the amount to withdraw: ")? else {
        return Ok(());
    };
    match engine.withdraw(amount) {
        Ok(()) => writeln!(output, "Successfully withdrew ${:.2}.", amount),
        Err(e) => writeln!(output, "{}", e),
    }
}

fn view_earnings<R: Rng, W: Write>(engine: &TradingEngine<R>, output: &mut W) -> io::Result<()> {
    let report = engine.earnings_report();
    writeln!(output, "\nTotal Portfolio Value: ${:.2}", report.total_value)?;
    writeln!(output, "Total Portfolio Cost: ${:.2}", report.total_cost)?;
    writeln!(output, "Earnings/Losses: ${:.2}", report.pnl)
}

fn next_round<R: Rng, W: Write>(engine: &mut TradingEngine<R>, output: &mut W) -> io::Result<()> {
    match engine.advance_round() {
        Ok(()) => writeln!(output, "\nRound complete. Prices and interest applied."),
        Err(e) => writeln!(output, "{}", e),
    }
}
