use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_value;

/// Column order for the scenario table. Mirrors the original report:
/// change %, shifted underlying, payoff at maturity, return %.
const SCENARIO_COLUMNS: [(&str, &str); 4] = [
    ("percent_change", "Change %"),
    ("underlying_at_maturity", "Underlying"),
    ("payoff", "Payoff at Maturity"),
    ("return_percent", "Return %"),
];

/// Format output as tables using the tabled crate: the allocation
/// summary first, then the scenario grid when present.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            if let Some(allocation) = result.get("allocation") {
                println!("Allocation");
                print_field_table(allocation);
            } else {
                // Allocation-only output nested without the envelope
                print_field_table(&Value::Object(result.clone()));
            }

            if let Some(rows) = result
                .get("scenarios")
                .and_then(|s| s.get("rows"))
                .and_then(Value::as_array)
            {
                println!("\nScenarios");
                print_scenario_table(rows);
            }
        }
        _ => print_field_table(value),
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = map.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_field_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            if matches!(val, Value::Array(_) | Value::Object(_)) {
                continue;
            }
            builder.push_record([key.as_str(), &render_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_scenario_table(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(SCENARIO_COLUMNS.map(|(_, header)| header));

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = SCENARIO_COLUMNS
                .iter()
                .map(|(key, _)| map.get(*key).map(render_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}
