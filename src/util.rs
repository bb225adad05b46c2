use serde_json::Value;

/// Extract hostname (and port) from a URL string
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    if s.is_empty() {
        return "".into();
    }
    let s = if let Some(idx) = s.find("://") { &s[idx + 3..] } else { s };
    let host = s.split('/').next().unwrap_or(s);
    host.to_string()
}

/// Single-cell rendering of a JSON value for terminal tables.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
