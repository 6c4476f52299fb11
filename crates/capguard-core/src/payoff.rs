use rust_decimal::Decimal;

use crate::types::{Money, CONTRACT_MULTIPLIER};

/// Strategy payoff at maturity for one hypothetical underlying price.
///
/// Two branches, boundary closed on the low side:
/// - `underlying <= strike`: the calls expire worthless; the premium
///   paid is a sunk loss and only the fixed-income interest comes back.
/// - `underlying > strike`: interest plus intrinsic value. The premium
///   is intentionally not subtracted on this branch; the source model
///   treats it as already reflected in the option budget.
pub fn evaluate_payoff(
    underlying_at_maturity: Money,
    strike_price: Money,
    option_contracts: u64,
    option_cost: Money,
    fixed_income_interest: Money,
) -> Money {
    if underlying_at_maturity <= strike_price {
        -option_cost + fixed_income_interest
    } else {
        let intrinsic = (underlying_at_maturity - strike_price)
            * Decimal::from(option_contracts)
            * CONTRACT_MULTIPLIER;
        fixed_income_interest + intrinsic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_below_strike_loses_premium_keeps_interest() {
        let payoff = evaluate_payoff(dec!(3000), dec!(3858.1), 561, dec!(16269000), dec!(6280000));
        assert_eq!(payoff, dec!(-9989000));
    }

    #[test]
    fn test_at_strike_uses_downside_branch() {
        // Exact equality routes to the worthless-expiry branch.
        let at_strike = evaluate_payoff(dec!(3858.1), dec!(3858.1), 561, dec!(16269000), dec!(6280000));
        assert_eq!(at_strike, dec!(-9989000));
    }

    #[test]
    fn test_above_strike_adds_intrinsic_without_premium_deduction() {
        // 10 points in the money, 5 contracts: intrinsic = 10 * 5 * 100
        let payoff = evaluate_payoff(dec!(3868.1), dec!(3858.1), 5, dec!(145000), dec!(1000));
        assert_eq!(payoff, dec!(1000) + dec!(5000));
    }

    #[test]
    fn test_left_continuity_at_strike() {
        let just_below = evaluate_payoff(dec!(3858.09), dec!(3858.1), 5, dec!(145000), dec!(1000));
        let at_strike = evaluate_payoff(dec!(3858.1), dec!(3858.1), 5, dec!(145000), dec!(1000));
        assert_eq!(just_below, at_strike);
    }

    #[test]
    fn test_zero_contracts_upside_is_interest_only() {
        let payoff = evaluate_payoff(dec!(5000), dec!(3858.1), 0, dec!(0), dec!(1234.56));
        assert_eq!(payoff, dec!(1234.56));
    }
}
