use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationResult, StrategyParameters};
use crate::error::StrategyError;
use crate::payoff::evaluate_payoff;
use crate::types::Money;
use crate::StrategyResult;

/// Percentage shifts swept by the scenario grid: -30% to +30% in steps
/// of 2, independent of the input parameters.
const GRID_LOW: i32 = -30;
const GRID_HIGH: i32 = 30;
const GRID_STEP: usize = 2;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One hypothetical underlying price at maturity and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Signed percentage shift from the current underlying price
    pub percent_change: i32,
    /// Shifted price, rounded to 2 decimals
    pub underlying_at_maturity: Money,
    /// Strategy payoff at that price, rounded to 2 decimals
    pub payoff: Money,
    /// Payoff as a percentage of total investment, rounded to 2 decimals
    pub return_percent: Decimal,
}

/// Scenario rows in ascending `percent_change` order. Built fresh per
/// evaluation; an immutable snapshot once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub rows: Vec<ScenarioRow>,
}

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

/// Sweep the fixed percentage grid, evaluate the payoff at each shifted
/// price, and assemble the result table.
///
/// Rounding is applied exactly where the reference outputs round: the
/// shifted price before payoff evaluation, then the payoff and return
/// columns independently. The return is derived from the unrounded
/// payoff.
pub fn build_scenario_table(
    params: &StrategyParameters,
    allocation: &AllocationResult,
) -> StrategyResult<ScenarioTable> {
    if params.total_investment.is_zero() {
        return Err(StrategyError::DivisionByZero {
            context: "scenario return percent (total_investment is zero)".into(),
        });
    }

    let mut rows = Vec::with_capacity(((GRID_HIGH - GRID_LOW) / GRID_STEP as i32 + 1) as usize);

    for percent_change in (GRID_LOW..=GRID_HIGH).step_by(GRID_STEP) {
        let shift = Decimal::ONE + Decimal::from(percent_change) / dec!(100);
        let underlying_at_maturity = (params.underlying_price * shift).round_dp(2);

        let payoff = evaluate_payoff(
            underlying_at_maturity,
            params.strike_price,
            allocation.option_contracts,
            allocation.option_cost,
            allocation.fixed_income_interest,
        );
        let return_percent = (payoff / params.total_investment * dec!(100)).round_dp(2);

        rows.push(ScenarioRow {
            percent_change,
            underlying_at_maturity,
            payoff: payoff.round_dp(2),
            return_percent,
        });
    }

    Ok(ScenarioTable { rows })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
