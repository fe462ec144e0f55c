use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by the prediction service alongside a failure status.
///
/// `error` is kept as raw JSON: services are not strict about its type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ErrorBody {
    /// Text to show for this failure, or `None` when the body carries no
    /// usable message (absent, `null`, `false`, `0` or empty string).
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(raw: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(raw)
            .expect("decode")
            .message()
    }

    #[test]
    fn string_error_is_used_verbatim() {
        assert_eq!(
            message_of(r#"{"error":"CGPA out of range"}"#).as_deref(),
            Some("CGPA out of range")
        );
    }

    #[test]
    fn missing_or_falsy_error_has_no_message() {
        assert_eq!(message_of("{}"), None);
        assert_eq!(message_of(r#"{"error":null}"#), None);
        assert_eq!(message_of(r#"{"error":""}"#), None);
        assert_eq!(message_of(r#"{"error":false}"#), None);
        assert_eq!(message_of(r#"{"error":0}"#), None);
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        assert_eq!(message_of(r#"{"error":123}"#).as_deref(), Some("123"));
        assert_eq!(message_of(r#"{"error":true}"#).as_deref(), Some("true"));
        assert_eq!(
            message_of(r#"{"error":{"field":"iq"}}"#).as_deref(),
            Some(r#"{"field":"iq"}"#)
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(
            message_of(r#"{"placed":false,"error":"bad input"}"#).as_deref(),
            Some("bad input")
        );
    }
}
