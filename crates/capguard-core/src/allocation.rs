use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::StrategyError;
use crate::types::{Money, Rate, CONTRACT_MULTIPLIER, DAYS_PER_YEAR};
use crate::StrategyResult;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Inputs for one strategy evaluation. Immutable once constructed; every
/// downstream result is a pure function of these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParameters {
    /// Current price of the underlying asset
    pub underlying_price: Money,
    /// Strike of the call options bought with the residual budget
    pub strike_price: Money,
    /// Call premium per share of the underlying (the contract
    /// multiplier is applied separately)
    pub call_premium: Money,
    /// Total capital committed to the strategy
    pub total_investment: Money,
    /// Annualised fixed-income yield as a decimal (0.443 = 44.3%)
    pub annual_rate: Rate,
    /// Days until both the bills and the options mature
    pub maturity_days: u32,
    /// Fraction of total investment to principal-protect, in (0, 1]
    pub guaranteed_fraction: Rate,
}

/// How the capital splits between the fixed-income leg and the option
/// leg. Derived once per parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Future amount the fixed-income leg must deliver
    pub guaranteed_amount: Money,
    /// Present value invested in fixed income today
    pub fixed_income_principal: Money,
    /// Interest earned by the fixed-income leg at maturity
    pub fixed_income_interest: Money,
    /// Residual capital available for buying calls. Reported as-is when
    /// negative so callers can detect an infeasible strategy.
    pub option_budget: Money,
    /// Whole call contracts the budget affords
    pub option_contracts: u64,
    /// Premium actually spent: contracts * premium * multiplier
    pub option_cost: Money,
}

impl StrategyParameters {
    /// Reject any input that would make the allocation arithmetic
    /// undefined or economically meaningless.
    pub fn validate(&self) -> StrategyResult<()> {
        if self.underlying_price <= Decimal::ZERO {
            return Err(StrategyError::InvalidInput {
                field: "underlying_price".into(),
                reason: "must be positive".into(),
            });
        }
        if self.strike_price <= Decimal::ZERO {
            return Err(StrategyError::InvalidInput {
                field: "strike_price".into(),
                reason: "must be positive".into(),
            });
        }
        if self.call_premium <= Decimal::ZERO {
            return Err(StrategyError::InvalidInput {
                field: "call_premium".into(),
                reason: "must be positive".into(),
            });
        }
        if self.total_investment <= Decimal::ZERO {
            return Err(StrategyError::InvalidInput {
                field: "total_investment".into(),
                reason: "must be positive".into(),
            });
        }
        if self.annual_rate <= Decimal::NEGATIVE_ONE {
            return Err(StrategyError::InvalidInput {
                field: "annual_rate".into(),
                reason: "must be greater than -100%".into(),
            });
        }
        if self.maturity_days == 0 {
            return Err(StrategyError::InvalidInput {
                field: "maturity_days".into(),
                reason: "must be positive".into(),
            });
        }
        if self.guaranteed_fraction <= Decimal::ZERO || self.guaranteed_fraction > Decimal::ONE {
            return Err(StrategyError::InvalidInput {
                field: "guaranteed_fraction".into(),
                reason: "must be between 0 (exclusive) and 1.0 (inclusive)".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Split the total investment into a fixed-income sub-investment sized
/// to guarantee `guaranteed_fraction` of principal at maturity, and a
/// residual budget spent on whole call contracts.
///
/// The fixed-income principal discounts the guaranteed future amount at
/// the annual rate over a days/365 year fraction.
pub fn compute_allocation(params: &StrategyParameters) -> StrategyResult<AllocationResult> {
    params.validate()?;

    let guaranteed_amount = params.total_investment * params.guaranteed_fraction;

    let year_fraction = Decimal::from(params.maturity_days) / DAYS_PER_YEAR;
    let discount_factor = (Decimal::ONE + params.annual_rate).powd(year_fraction);
    if discount_factor.is_zero() {
        return Err(StrategyError::DivisionByZero {
            context: "fixed-income discount factor".into(),
        });
    }

    let fixed_income_principal = guaranteed_amount / discount_factor;
    let fixed_income_interest = guaranteed_amount - fixed_income_principal;
    let option_budget = params.total_investment - fixed_income_principal;

    let contract_cost = params.call_premium * CONTRACT_MULTIPLIER;
    let option_contracts = if option_budget > Decimal::ZERO {
        (option_budget / contract_cost).floor().to_u64().unwrap_or(0)
    } else {
        0
    };
    let option_cost = Decimal::from(option_contracts) * contract_cost;

    Ok(AllocationResult {
        guaranteed_amount,
        fixed_income_principal,
        fixed_income_interest,
        option_budget,
        option_contracts,
        option_cost,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

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
    fn test_guaranteed_amount_is_fraction_of_investment() {
        let alloc = compute_allocation(&base_params()).unwrap();
        assert_eq!(alloc.guaranteed_amount, dec!(90000000.0));
    }

    #[test]
    fn test_principal_discounts_to_guaranteed_amount() {
        let params = base_params();
        let alloc = compute_allocation(&params).unwrap();

        // Principal compounded at the annual rate over 72/365 years must
        // grow back to the guaranteed amount.
        let factor = (Decimal::ONE + params.annual_rate)
            .powd(Decimal::from(params.maturity_days) / dec!(365));
        let grown = alloc.fixed_income_principal * factor;
        assert!(
            (grown - alloc.guaranteed_amount).abs() < dec!(1),
            "principal {} grows to {}, expected {}",
            alloc.fixed_income_principal,
            grown,
            alloc.guaranteed_amount
        );
    }

    #[test]
    fn test_interest_non_negative_for_non_negative_rate() {
        let alloc = compute_allocation(&base_params()).unwrap();
        assert!(alloc.fixed_income_interest >= Decimal::ZERO);
    }

    #[test]
    fn test_contracts_maximal_within_budget() {
        let params = base_params();
        let alloc = compute_allocation(&params).unwrap();
        let contract_cost = params.call_premium * CONTRACT_MULTIPLIER;

        let spent = Decimal::from(alloc.option_contracts) * contract_cost;
        assert!(spent <= alloc.option_budget);
        let one_more = Decimal::from(alloc.option_contracts + 1) * contract_cost;
        assert!(one_more > alloc.option_budget);
        assert_eq!(alloc.option_cost, spent);
    }

    #[test]
    fn test_full_guarantee_zero_rate_boundary() {
        let mut params = base_params();
        params.guaranteed_fraction = dec!(1.0);
        params.annual_rate = dec!(0.0);

        let alloc = compute_allocation(&params).unwrap();
        assert_eq!(alloc.fixed_income_principal, alloc.guaranteed_amount);
        assert_eq!(alloc.fixed_income_interest, Decimal::ZERO);
        assert_eq!(
            alloc.option_budget,
            params.total_investment - alloc.guaranteed_amount
        );
        assert_eq!(alloc.option_contracts, 0);
        assert_eq!(alloc.option_cost, Decimal::ZERO);
    }

    #[test]
    fn test_negative_budget_reported_not_clamped() {
        // A negative deposit rate makes the required principal exceed
        // the total investment: infeasible, but not an error.
        let mut params = base_params();
        params.guaranteed_fraction = dec!(1.0);
        params.annual_rate = dec!(-0.5);
        params.maturity_days = 365;

        let alloc = compute_allocation(&params).unwrap();
        assert!(alloc.option_budget < Decimal::ZERO);
        assert_eq!(alloc.option_contracts, 0);
        assert_eq!(alloc.option_cost, Decimal::ZERO);
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let cases: Vec<(&str, Box<dyn Fn(&mut StrategyParameters)>)> = vec![
            ("underlying_price", Box::new(|p| p.underlying_price = dec!(0))),
            ("strike_price", Box::new(|p| p.strike_price = dec!(-1))),
            ("call_premium", Box::new(|p| p.call_premium = dec!(0))),
            ("total_investment", Box::new(|p| p.total_investment = dec!(0))),
            ("annual_rate", Box::new(|p| p.annual_rate = dec!(-1))),
            ("maturity_days", Box::new(|p| p.maturity_days = 0)),
            ("guaranteed_fraction", Box::new(|p| p.guaranteed_fraction = dec!(1.5))),
        ];

        for (field, mutate) in cases {
            let mut params = base_params();
            mutate(&mut params);
            match compute_allocation(&params) {
                Err(StrategyError::InvalidInput { field: f, .. }) => {
                    assert_eq!(f, field);
                }
                other => panic!("expected InvalidInput for {field}, got {other:?}"),
            }
        }
    }
}
