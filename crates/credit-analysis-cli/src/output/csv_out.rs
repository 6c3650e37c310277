use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout. Results carrying an entity breakdown are
/// written one row per entity, with a final row for the group total.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let headline = match result.get("pro_forma") {
                Some(Value::Object(pf)) => pf,
                _ => result,
            };
            if let Some(Value::Array(rows)) = headline.get("entity_breakdown") {
                write_breakdown_csv(&mut wtr, rows, headline);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_breakdown_csv<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[Value],
    global: &Map<String, Value>,
) {
    let _ = wtr.write_record(["entity_id", "entity_name", "cash_flow", "debt_service", "dscr", "status"]);
    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = ["entity_id", "entity_name", "cash_flow", "debt_service", "dscr", "status"]
                .iter()
                .map(|k| map.get(*k).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&cells);
        }
    }
    let total = [
        String::from("global"),
        String::from("Global"),
        global.get("combined_cash_flow").map(format_csv_value).unwrap_or_default(),
        global.get("total_debt_service").map(format_csv_value).unwrap_or_default(),
        global.get("global_dscr").map(format_csv_value).unwrap_or_default(),
        global.get("status").map(format_csv_value).unwrap_or_default(),
    ];
    let _ = wtr.write_record(&total);
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
