use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use capguard_core::{compute_allocation, evaluate_strategy, StrategyParameters};

use crate::input;

/// Strategy parameters shared by the evaluate and allocate commands.
/// Defaults reproduce the reference example: ARS 100m, 90% protected at
/// 44.3% annual over 72 days, calls struck at 3858.1 for a 290 premium.
#[derive(Args)]
pub struct ParamArgs {
    /// Path to a JSON file with the strategy parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Current price of the underlying asset
    #[arg(long, default_value = "3680.0")]
    pub underlying_price: Decimal,

    /// Strike price of the call options
    #[arg(long, default_value = "3858.1")]
    pub strike_price: Decimal,

    /// Call premium per share of the underlying
    #[arg(long, default_value = "290.0")]
    pub call_premium: Decimal,

    /// Total capital to invest
    #[arg(long, default_value = "100000000.0")]
    pub total_investment: Decimal,

    /// Annualised fixed-income rate as a decimal (0.05 = 5%)
    #[arg(long, default_value = "0.443", allow_hyphen_values = true)]
    pub annual_rate: Decimal,

    /// Days until the options and bills mature
    #[arg(long, default_value = "72")]
    pub maturity_days: u32,

    /// Fraction of capital to guarantee (0.90 = 90%)
    #[arg(long, default_value = "0.9")]
    pub guaranteed_fraction: Decimal,
}

/// Arguments for the full evaluation (allocation + scenario table)
#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Arguments for the allocation-only command
#[derive(Args)]
pub struct AllocateArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Resolve parameters with the usual precedence: --input file, then
/// piped stdin JSON, then the command-line flags.
fn resolve_params(args: &ParamArgs) -> Result<StrategyParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::read_params_file(path);
    }
    if let Some(params) = input::read_params_stdin()? {
        return Ok(params);
    }
    Ok(StrategyParameters {
        underlying_price: args.underlying_price,
        strike_price: args.strike_price,
        call_premium: args.call_premium,
        total_investment: args.total_investment,
        annual_rate: args.annual_rate,
        maturity_days: args.maturity_days,
        guaranteed_fraction: args.guaranteed_fraction,
    })
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.params)?;
    let result = evaluate_strategy(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_allocate(args: AllocateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.params)?;
    let allocation = compute_allocation(&params)?;
    Ok(serde_json::to_value(allocation)?)
}
