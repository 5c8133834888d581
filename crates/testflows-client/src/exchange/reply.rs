//! Webhook reply decoding.

use serde_json::Value;

use crate::transport::ExchangeError;

/// Pull the assistant text out of a webhook reply.
///
/// The reply must be an array whose first element is an object. Its
/// `message` field becomes the answer; a missing, null, `false` or empty
/// `message` yields `fallback`. Any other shape is an error.
pub fn extract_reply(body: &Value, fallback: &str) -> Result<String, ExchangeError> {
    let items = body
        .as_array()
        .ok_or_else(|| ExchangeError::Shape(format!("expected a JSON array, got {}", kind(body))))?;

    let first = items
        .first()
        .ok_or_else(|| ExchangeError::Shape("empty array".into()))?;

    let object = first.as_object().ok_or_else(|| {
        ExchangeError::Shape(format!("first element is {}, not an object", kind(first)))
    })?;

    match object.get("message") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(fallback.to_string()),
        Some(Value::String(text)) if text.is_empty() => Ok(fallback.to_string()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(fallback.to_string()),
        Some(scalar @ (Value::Number(_) | Value::Bool(true))) => Ok(scalar.to_string()),
        Some(other) => Err(ExchangeError::Shape(format!(
            "message is {}, not text",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
