use serde_json::{Number, Value};

// Parsed model output. Field readers never fail: a missing or wrong-typed field
// yields the caller's default so responses keep their declared shape.
pub struct ModelOutput {
    value: Value,
}

impl ModelOutput {
    // None when the model text is not valid JSON.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw)
            .ok()
            .map(|value| Self { value })
    }

    pub fn text_or(&self, field: &str, default: &str) -> String {
        match self.value.get(field) {
            Some(Value::String(text)) => text.clone(),
            _ => default.to_string(),
        }
    }

    pub fn list(&self, field: &str) -> &[Value] {
        match self.value.get(field) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    // Entries are stringified; entries that end up empty are dropped.
    pub fn string_list(&self, field: &str) -> Vec<String> {
        self.list(field)
            .iter()
            .map(stringify)
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

// Display form of an arbitrary JSON value. Null renders as an empty string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

// Integral floats print without a fractional part, so `1.0` and `1` agree.
fn number_text(number: &Number) -> String {
    if let Some(float) = number.as_f64().filter(|_| number.is_f64()) {
        if float.is_finite() && float.fract() == 0.0 && float.abs() < 1e15 {
            return format!("{}", float as i64);
        }
    }
    number.to_string()
}
