//! Human-readable rendering of untyped API payloads

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Render a payload as indented `key: value` lines
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out.trim_end().to_string()
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Object(map) if map.is_empty() => push_line(out, depth, &"(empty)".dimmed().to_string()),
        Value::Object(map) => {
            for (key, item) in map {
                if is_scalar(item) {
                    push_line(out, depth, &format!("{}: {}", key.bold(), scalar(item)));
                } else {
                    push_line(out, depth, &format!("{}:", key.bold()));
                    write_value(out, item, depth + 1);
                }
            }
        }
        Value::Array(items) if items.is_empty() => push_line(out, depth, &"(none)".dimmed().to_string()),
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined: Vec<String> = items.iter().map(scalar).collect();
            push_line(out, depth, &joined.join(", "));
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_line(out, depth, &format!("[{}]", i).dimmed().to_string());
                write_value(out, item, depth + 1);
            }
        }
        scalar_value => push_line(out, depth, &scalar(scalar_value)),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(line);
    out.push('\n');
}
