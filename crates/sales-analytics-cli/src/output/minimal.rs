use serde_json::Value;

/// Print just the key answer from the output.
///
/// Ranked rows print one line each with their values tab-separated.
/// Otherwise the first well-known field present wins, then the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["badge", "fiscal_year", "total_sold_quantity"];

    if let Value::Object(map) = result_obj {
        if let Some(Value::Array(rows)) = map.get("rows") {
            for row in rows {
                println!("{}", format_row(row));
            }
            return;
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
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

fn format_row(row: &Value) -> String {
    match row {
        Value::Object(map) => map
            .values()
            .map(format_minimal)
            .collect::<Vec<_>>()
            .join("\t"),
        other => format_minimal(other),
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
