//! Trading engine
//!
//! This module provides the TradingEngine that orchestrates the session by
//! coordinating the Market and Portfolio components with the cash balance.
//!
//! The engine enforces the session rules:
//! - Orders settle against cash-derived buying power
//! - Sales only reduce or close existing long holdings
//! - The per-round transition applies idle interest, the margin check, and
//!   the random price walk in a fixed order
//!
//! Every operation either fully commits or fully rejects; a returned error
//! means the cash balance, market, and portfolio are exactly as they were.

use crate::core::market::Market;
use crate::core::portfolio::Portfolio;
use crate::types::{EarningsReport, SessionConfig, TradingError};
use rand::Rng;
use rust_decimal::Decimal;

/// Turn-based trading engine holding all session state
///
/// Owns the cash balance, market, portfolio, session constants, and the
/// random-number source used for the idle-rate draw and the price walk.
/// The RNG is injected so tests can run deterministic sessions.
pub struct TradingEngine<R: Rng> {
    cash: Decimal,
    market: Market,
    portfolio: Portfolio,
    config: SessionConfig,
    /// Idle-cash interest rate, drawn once at session start
    idle_interest_rate: Decimal,
    rng: R,
}

impl<R: Rng> TradingEngine<R> {
    /// Create a new engine with the default market listings
    ///
    /// Sets the cash balance to the configured starting amount, the market
    /// to the fixed default listing table, and the portfolio to empty. The
    /// idle interest rate is drawn uniformly from the configured range and
    /// stays fixed for the remainder of the session.
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self::with_market(config, Market::with_default_listings(), rng)
    }

    /// Create a new engine over a specific market
    pub fn with_market(config: SessionConfig, market: Market, mut rng: R) -> Self {
        let rate_bp = rng.gen_range(config.idle_rate_min_bp..=config.idle_rate_max_bp);
        let idle_interest_rate = Decimal::new(rate_bp, 4);

        TradingEngine {
            cash: config.starting_balance,
            market,
            portfolio: Portfolio::new(),
            config,
            idle_interest_rate,
            rng,
        }
    }

    /// Current cash balance
    ///
    /// May be negative when margin interest or a short close has driven
    /// the account into deficit.
    pub fn cash_balance(&self) -> Decimal {
        self.cash
    }

    /// The session's idle-cash interest rate, as a fraction per round
    pub fn idle_interest_rate(&self) -> Decimal {
        self.idle_interest_rate
    }

    /// Read access to the market
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Read access to the portfolio
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Current market price for a symbol
    ///
    /// # Errors
    ///
    /// Returns `UnknownSymbol` if the symbol is not listed.
    pub fn quote(&self, symbol: &str) -> Result<Decimal, TradingError> {
        self.market.quote(symbol)
    }

    /// Cash-derived spending limit including the margin multiplier
    ///
    /// Always derived, never stored: `max(0, cash) * margin multiplier`.
    /// The clamp applies only to this derived limit; settlement elsewhere
    /// uses the signed balance.
    pub fn buying_power(&self) -> Decimal {
        self.cash.max(Decimal::ZERO) * self.config.margin_multiplier
    }

    /// Buy shares of a symbol at the current market price
    ///
    /// Debits the cash balance by `shares * price` and adds the shares to
    /// the portfolio. A new position records the current price as its entry
    /// price; an existing position keeps its original entry price. The
    /// additive share semantics also cover shorts: buying against a negative
    /// count nets it toward zero.
    ///
    /// Returns the settled cost for display.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The symbol is not listed (`UnknownSymbol`)
    /// - The share count is zero (`InvalidAmount`)
    /// - The cost exceeds buying power (`InsufficientBuyingPower`)
    pub fn buy(&mut self, symbol: &str, shares: u32) -> Result<Decimal, TradingError> {
        if shares == 0 {
            return Err(TradingError::invalid_amount(Decimal::ZERO));
        }

        let price = self.market.quote(symbol)?;
        let cost = Decimal::from(shares)
            .checked_mul(price)
            .ok_or_else(|| TradingError::arithmetic_overflow("buy"))?;

        let buying_power = self.buying_power();
        if cost > buying_power {
            return Err(TradingError::insufficient_buying_power(cost, buying_power));
        }

        let new_cash = self
            .cash
            .checked_sub(cost)
            .ok_or_else(|| TradingError::arithmetic_overflow("buy"))?;

        // Commit
        self.cash = new_cash;
        self.portfolio.add_shares(symbol, i64::from(shares), price);

        Ok(cost)
    }

    /// Sell shares of a held long position at the current market price
    ///
    /// Credits the cash balance by `shares * price` and decrements the
    /// position; an entry reduced to zero is removed from the portfolio.
    /// Selling never opens a short position.
    ///
    /// Returns the settled proceeds for display.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The share count is zero (`InvalidAmount`)
    /// - No position is held in the symbol (`SymbolNotHeld`)
    /// - The count exceeds the held shares (`InsufficientShares`)
    pub fn sell(&mut self, symbol: &str, shares: u32) -> Result<Decimal, TradingError> {
        if shares == 0 {
            return Err(TradingError::invalid_amount(Decimal::ZERO));
        }

        let requested = i64::from(shares);
        let position = self
            .portfolio
            .get(symbol)
            .ok_or_else(|| TradingError::symbol_not_held(symbol))?;

        if requested > position.shares {
            return Err(TradingError::insufficient_shares(
                symbol,
                position.shares,
                requested,
            ));
        }

        let price = self.market.quote(symbol)?;
        let proceeds = Decimal::from(shares)
            .checked_mul(price)
            .ok_or_else(|| TradingError::arithmetic_overflow("sell"))?;
        let new_cash = self
            .cash
            .checked_add(proceeds)
            .ok_or_else(|| TradingError::arithmetic_overflow("sell"))?;

        // Commit; the reduction was validated above
        self.portfolio.reduce(symbol, requested)?;
        self.cash = new_cash;

        Ok(proceeds)
    }

    /// Deposit funds into the cash balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` unless the amount is positive.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), TradingError> {
        if amount <= Decimal::ZERO {
            return Err(TradingError::invalid_amount(amount));
        }

        self.cash = self
            .cash
            .checked_add(amount)
            .ok_or_else(|| TradingError::arithmetic_overflow("deposit"))?;

        Ok(())
    }

    /// Withdraw funds from the cash balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` unless the amount is positive, or
    /// `InsufficientFunds` if it exceeds the current cash balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), TradingError> {
        if amount <= Decimal::ZERO {
            return Err(TradingError::invalid_amount(amount));
        }
        if amount > self.cash {
            return Err(TradingError::insufficient_funds(self.cash, amount));
        }

        self.cash = self
            .cash
            .checked_sub(amount)
            .ok_or_else(|| TradingError::arithmetic_overflow("withdraw"))?;

        Ok(())
    }

    /// Force-liquidate every held position
    ///
    /// Long positions are credited at the current market price; short
    /// positions are debited at their entry price rather than the market
    /// price. The portfolio is emptied unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a settlement would overflow the
    /// cash balance.
    pub fn close_positions(&mut self) -> Result<(), TradingError> {
        for (symbol, position) in self.portfolio.drain() {
            let price = self.market.price(&symbol).unwrap_or(Decimal::ZERO);

            if position.is_long() {
                let proceeds = Decimal::from(position.shares)
                    .checked_mul(price)
                    .ok_or_else(|| TradingError::arithmetic_overflow("close long"))?;
                self.cash = self
                    .cash
                    .checked_add(proceeds)
                    .ok_or_else(|| TradingError::arithmetic_overflow("close long"))?;
            } else if position.is_short() {
                // Shorts settle at the recorded entry price
                let cost = Decimal::from(position.shares.unsigned_abs())
                    .checked_mul(position.entry_price)
                    .ok_or_else(|| TradingError::arithmetic_overflow("close short"))?;
                self.cash = self
                    .cash
                    .checked_sub(cost)
                    .ok_or_else(|| TradingError::arithmetic_overflow("close short"))?;
            }
        }

        Ok(())
    }

    /// Advance the simulation by one round
    ///
    /// Executes the per-round transition in a fixed order:
    /// 1. Idle-cash interest compounds the balance, deficits included.
    /// 2. The margin balance is computed as the net signed share count
    ///    times the single highest market price.
    /// 3. If the margin balance falls below the minimum capital ratio of
    ///    the balance, every position is force-liquidated and no margin
    ///    interest is charged this round.
    /// 4. Otherwise positive margin interest is debited from the balance.
    /// 5. Every market price draws its own random move in [-10%, +10%].
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if any step overflows.
    pub fn advance_round(&mut self) -> Result<(), TradingError> {
        let growth = Decimal::ONE + self.idle_interest_rate;
        self.cash = self
            .cash
            .checked_mul(growth)
            .ok_or_else(|| TradingError::arithmetic_overflow("idle interest"))?;

        let margin_balance = Decimal::from(self.portfolio.net_shares())
            .checked_mul(self.market.max_price())
            .ok_or_else(|| TradingError::arithmetic_overflow("margin balance"))?;
        let margin_interest = margin_balance
            .checked_mul(self.config.margin_interest_rate)
            .ok_or_else(|| TradingError::arithmetic_overflow("margin interest"))?;

        let capital_floor = self
            .config
            .minimum_capital_ratio
            .checked_mul(self.cash)
            .ok_or_else(|| TradingError::arithmetic_overflow("capital floor"))?;

        if margin_balance < capital_floor {
            // Margin call: forced liquidation, no interest charged this round
            self.close_positions()?;
        } else if margin_interest > Decimal::ZERO {
            self.cash = self
                .cash
                .checked_sub(margin_interest)
                .ok_or_else(|| TradingError::arithmetic_overflow("margin interest"))?;
        }

        self.market.apply_price_shocks(&mut self.rng)
    }

    /// Snapshot of portfolio value, cost, and profit/loss
    ///
    /// Value sums signed share counts at current market prices; cost sums
    /// absolute share counts at entry prices. Purely a read.
    pub fn earnings_report(&self) -> EarningsReport {
        let mut total_value = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;

        for (symbol, position) in self.portfolio.positions_sorted() {
            if let Some(price) = self.market.price(symbol) {
                total_value += Decimal::from(position.shares) * price;
                total_cost +=
                    Decimal::from(position.shares.unsigned_abs()) * position.entry_price;
            }
        }

        EarningsReport {
            total_value,
            total_cost,
            pnl: total_value - total_cost,
        }
    }
}
