use serde_json::Value;

// Appended when upstream text was cut short.
pub const ELLIPSIS: &str = "…";

// Cuts on character boundaries, never inside a multi-byte sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    let cut = truncate_chars(text, max_chars);
    if cut.len() == text.len() {
        return text.to_string();
    }
    format!("{cut}{ELLIPSIS}")
}

// First `limit` entries of a JSON array; anything else contributes nothing.
pub fn take_first(value: Option<&Value>, limit: usize) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.iter().take(limit).cloned().collect(),
        _ => Vec::new(),
    }
}

// Required text inputs must be JSON strings with at least one character.
pub fn non_empty_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    }
}
