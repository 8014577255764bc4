use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::utils::parse_decimal;

/// Investment and site feasibility calculator for managed blueberry farms
/// in the Darjeeling hills.
#[derive(Debug, Parser)]
#[command(name = "darjberry", version)]
pub struct Cli {
    /// Path to a TOML config file (default: ./darjberry.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `darjberry_core=trace`. Overrides
    /// RUST_LOG and the config file.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project costs, yields and returns for a plot.
    Calculate(CalculateArgs),
    /// Compare a blueberry plot against a tea estate of the same size.
    Compare(CompareArgs),
    /// Check farm loan eligibility.
    Loan(LoanArgs),
    /// Analyze a location's suitability.
    Analyze(AnalyzeArgs),
    /// Analyze every point in a CSV file.
    Batch(BatchArgs),
    /// Coarse satellite-style suitability report.
    Satellite(SatelliteArgs),
    /// List saved calculations.
    History(OutputArgs),
    /// List saved location checks.
    Checks(ChecksArgs),
    /// Delete a saved calculation.
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    /// Plot size in acres.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub acres: Decimal,

    /// Selling price in ₹/kg (default from config, 800).
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub price: Option<Decimal>,

    /// Save the result.
    #[arg(long)]
    pub save: bool,

    #[arg(long, requires = "save")]
    pub investor: Option<String>,

    #[arg(long, requires = "save")]
    pub notes: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub acres: Decimal,

    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub price: Option<Decimal>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct LoanArgs {
    /// Total investment in ₹.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub investment: Decimal,

    /// Applicant's annual income in ₹.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    pub income: Decimal,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Save the check.
    #[arg(long)]
    pub save: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV with `latitude,longitude[,label]` columns.
    #[arg(long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SatelliteArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ChecksArgs {
    /// Only checks in this district (case-insensitive).
    #[arg(long)]
    pub district: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct DeleteArgs {
    #[arg(long)]
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_calculate_with_options() {
        let cli = Cli::try_parse_from([
            "darjberry", "calculate", "--acres", "1.5", "--price", "1,000", "--save",
            "--investor", "Asha", "--json",
        ])
        .unwrap();

        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.acres, dec!(1.5));
        assert_eq!(args.price, Some(dec!(1000)));
        assert!(args.save);
        assert_eq!(args.investor.as_deref(), Some("Asha"));
        assert!(args.output.json);
    }

    #[test]
    fn investor_requires_save() {
        assert!(
            Cli::try_parse_from(["darjberry", "calculate", "--acres", "1", "--investor", "A"])
                .is_err()
        );
    }

    #[test]
    fn negative_longitude_is_accepted() {
        let cli =
            Cli::try_parse_from(["darjberry", "satellite", "--lat", "51.5", "--lng", "-0.12"])
                .unwrap();

        let Command::Satellite(args) = cli.command else {
            panic!("expected satellite");
        };
        assert_eq!(args.lng, -0.12);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "darjberry", "history", "--log-level", "debug", "--config", "farm.toml",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("farm.toml")));
    }

    #[test]
    fn bad_decimal_is_rejected() {
        assert!(Cli::try_parse_from(["darjberry", "calculate", "--acres", "lots"]).is_err());
    }
}
