use colored::Colorize;
use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Pro forma output nests the headline under `pro_forma`.
    let result_obj = result_obj
        .as_object()
        .and_then(|m| m.get("pro_forma"))
        .filter(|v| v.is_object())
        .unwrap_or(result_obj);

    let priority_keys = [
        "global_dscr",
        "dscr",
        "monthly_payment",
        "annual_debt_service",
        "total_impact",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    match map.get("status").and_then(Value::as_str) {
                        Some(status) => println!("{} {}", format_minimal(val), paint_status(status)),
                        None => println!("{}", format_minimal(val)),
                    }
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn paint_status(status: &str) -> String {
    match status {
        "pass" => status.green().bold().to_string(),
        "marginal" => status.yellow().bold().to_string(),
        "fail" => status.red().bold().to_string(),
        _ => status.cyan().to_string(),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
