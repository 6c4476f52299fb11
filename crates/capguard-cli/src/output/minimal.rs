use serde_json::Value;

use super::render_value;

/// Print just the headline strategy figures: contracts bought,
/// fixed-income interest earned, and the option budget.
pub fn print_minimal(value: &Value) {
    // Evaluate output nests the allocation in the envelope; the
    // allocate command returns it flat.
    let allocation = value
        .pointer("/result/allocation")
        .or_else(|| value.get("result"))
        .unwrap_or(value);

    let headline_keys = [
        "option_contracts",
        "fixed_income_interest",
        "option_budget",
    ];

    if let Value::Object(map) = allocation {
        let mut printed = false;
        for key in &headline_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}: {}", key, render_value(val));
                    printed = true;
                }
            }
        }
        if printed {
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, render_value(val));
            return;
        }
    }

    println!("{}", render_value(allocation));
}
