use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::allocation::{compute_allocation, AllocationResult, StrategyParameters};
use crate::scenario::{build_scenario_table, ScenarioTable};
use crate::types::{with_metadata, ComputationOutput, CONTRACT_MULTIPLIER};
use crate::StrategyResult;

/// Full result of one strategy evaluation: the capital split plus the
/// payoff table across the price grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyOutput {
    pub allocation: AllocationResult,
    pub scenarios: ScenarioTable,
    pub warnings: Vec<String>,
}

/// Run the whole pipeline: validate, allocate capital between the two
/// legs, then sweep the scenario grid.
pub fn evaluate_strategy(
    params: &StrategyParameters,
) -> StrategyResult<ComputationOutput<StrategyOutput>> {
    let start = Instant::now();

    let allocation = compute_allocation(params)?;
    let scenarios = build_scenario_table(params, &allocation)?;

    let mut warnings = Vec::new();
    if allocation.option_budget < Decimal::ZERO {
        warnings.push(format!(
            "Option budget is negative ({}): the fixed-income principal required to guarantee \
             {} exceeds the total investment; the strategy is infeasible at this protection level",
            allocation.option_budget, allocation.guaranteed_amount
        ));
    } else if allocation.option_contracts == 0 {
        warnings.push(format!(
            "Option budget {} buys zero whole contracts at {} per contract; the strategy has \
             no upside participation",
            allocation.option_budget,
            params.call_premium * CONTRACT_MULTIPLIER
        ));
    }
    if params.strike_price <= params.underlying_price {
        warnings.push(format!(
            "Strike {} is at or below the current underlying price {}; the calls are already \
             in the money",
            params.strike_price, params.underlying_price
        ));
    }

    let methodology = "Capital-guaranteed decomposition: guaranteed amount discounted at the \
                       annual rate over days/365 to size the fixed-income leg, residual budget \
                       floored into whole call contracts, payoff swept over a -30%..+30% grid \
                       in 2% steps. Option premium is treated as sunk on the downside branch \
                       only, per the source model.";

    let assumptions = serde_json::json!({
        "underlying_price": params.underlying_price.to_string(),
        "strike_price": params.strike_price.to_string(),
        "call_premium": params.call_premium.to_string(),
        "total_investment": params.total_investment.to_string(),
        "annual_rate": params.annual_rate.to_string(),
        "maturity_days": params.maturity_days,
        "guaranteed_fraction": params.guaranteed_fraction.to_string(),
        "contract_multiplier": CONTRACT_MULTIPLIER.to_string(),
        "year_fraction_convention": "days/365",
        "rounding": "2dp banker's rounding at shifted price, payoff and return columns",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    let all_warnings = warnings.clone();

    Ok(with_metadata(
        methodology,
        &assumptions,
        all_warnings,
        elapsed,
        StrategyOutput {
            allocation,
            scenarios,
            warnings,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_params() -> StrategyParameters {
        StrategyParameters {
            underlying_price: dec!(3680.0),
            strike_price: dec!(3858.1),
            call_premium: dec!(290.0),
            total_investment: dec!(100000000.0),
            annual_rate: dec!(0.443),
            maturity_days: 72,
            guaranteed_fraction: dec!(0.9),
        }
    }

    #[test]
    fn test_envelope_metadata_populated() {
        let result = evaluate_strategy(&base_params()).unwrap();
        assert!(!result.methodology.is_empty());
        assert!(!result.metadata.version.is_empty());
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
        assert_eq!(result.result.scenarios.rows.len(), 31);
    }

    #[test]
    fn test_no_warnings_for_feasible_out_of_money_setup() {
        let result = evaluate_strategy(&base_params()).unwrap();
        assert!(
            result.warnings.is_empty(),
            "unexpected warnings: {:?}",
            result.warnings
        );
    }

    #[test]
    fn test_negative_budget_warns() {
        let mut params = base_params();
        params.guaranteed_fraction = dec!(1.0);
        params.annual_rate = dec!(-0.5);
        params.maturity_days = 365;

        let result = evaluate_strategy(&params).unwrap();
        assert!(result.result.allocation.option_budget < Decimal::ZERO);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("infeasible")));
    }

    #[test]
    fn test_in_the_money_strike_warns() {
        let mut params = base_params();
        params.strike_price = dec!(3600.0);

        let result = evaluate_strategy(&params).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("already") && w.contains("in the money")));
    }
}
