use crate::types::SessionConfig;
use clap::Parser;
use rust_decimal::Decimal;

/// Play a turn-based stock trading simulation
#[derive(Parser, Debug)]
#[command(name = "trading-sim")]
#[command(about = "Single-player turn-based stock trading simulation", long_about = None)]
pub struct CliArgs {
    /// Seed for the session's random-number source
    #[arg(
        long = "seed",
        value_name = "SEED",
        help = "Seed the price walk and interest draw for a reproducible session"
    )]
    pub seed: Option<u64>,

    /// Starting cash balance
    #[arg(
        long = "balance",
        value_name = "AMOUNT",
        allow_negative_numbers = true,
        help = "Starting cash balance (default: 10000)"
    )]
    pub balance: Option<Decimal>,
}

impl CliArgs {
    /// Create a SessionConfig from CLI arguments
    ///
    /// Uses the provided starting balance when given, falling back to the
    /// default configuration otherwise. Non-positive balances fall back to
    /// the default with a warning on stderr.
    ///
    /// # Returns
    ///
    /// A `SessionConfig` with values from CLI arguments or defaults.
    pub fn to_session_config(&self) -> SessionConfig {
        match self.balance {
            Some(balance) => SessionConfig::with_starting_balance(balance),
            None => SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_options(&["program"], None, None)]
    #[case::seed_only(&["program", "--seed", "42"], Some(42), None)]
    #[case::balance_only(&["program", "--balance", "2500"], None, Some(Decimal::from(2500)))]
    #[case::all_options(
        &["program", "--seed", "42", "--balance", "2500.50"],
        Some(42),
        Some(Decimal::new(250050, 2))
    )]
    fn test_argument_parsing(
        #[case] args: &[&str],
        #[case] seed: Option<u64>,
        #[case] balance: Option<Decimal>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.seed, seed);
        assert_eq!(parsed.balance, balance);
    }

    #[rstest]
    #[case::default_balance(&["program"], Decimal::from(10000))]
    #[case::custom_balance(&["program", "--balance", "2500"], Decimal::from(2500))]
    #[case::non_positive_falls_back(&["program", "--balance", "-5"], Decimal::from(10000))]
    fn test_session_config_conversion(#[case] args: &[&str], #[case] expected: Decimal) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_session_config();

        assert_eq!(config.starting_balance, expected);
    }

    #[rstest]
    #[case::invalid_seed(&["program", "--seed", "abc"])]
    #[case::invalid_balance(&["program", "--balance", "lots"])]
    #[case::unknown_flag(&["program", "--rounds", "5"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
