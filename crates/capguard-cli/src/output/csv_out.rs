use serde_json::Value;
use std::io;

use super::render_value;

/// Write output as CSV to stdout. Scenario rows become one record per
/// grid point; anything else degrades to field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let scenario_rows = value
        .pointer("/result/scenarios/rows")
        .and_then(Value::as_array);

    match scenario_rows {
        Some(rows) => write_scenario_csv(&mut wtr, rows),
        None => write_fields_csv(&mut wtr, value),
    }

    let _ = wtr.flush();
}

fn write_scenario_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let _ = wtr.write_record(["percent_change", "underlying_at_maturity", "payoff", "return_percent"]);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = ["percent_change", "underlying_at_maturity", "payoff", "return_percent"]
                .iter()
                .map(|key| map.get(*key).map(render_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, value: &Value) {
    // Allocation-only output is a flat object; envelopes nest it under
    // "result".
    let fields = value
        .pointer("/result/allocation")
        .or_else(|| value.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = fields {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            if matches!(val, Value::Array(_) | Value::Object(_)) {
                continue;
            }
            let _ = wtr.write_record([key.as_str(), &render_value(val)]);
        }
    }
}
