//! The backend's error payload.
//!
//! Failed requests come back with a JSON body like:
//!
//! ```json
//! { "message": "Validation failed", "code": "VALIDATION", "errors": { "name": ["must not be blank"] } }
//! ```
//!
//! Every field is optional, and in practice proxies and crashed handlers
//! return HTML, plain text, or nothing at all. Reading is therefore lenient:
//! anything that can't be understood is treated as absent instead of
//! failing a second time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → validation messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error details extracted from a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description. Never blank when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Server-defined error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Per-field validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

#[cfg(feature = "json")]
impl ErrorBody {
    /// Reads whatever error details a response body carries.
    ///
    /// Never fails. Rules:
    /// - a body that isn't a JSON object yields an empty `ErrorBody`
    /// - `message` is kept only if it is a non-blank string
    /// - `code` may be a string or a number (numbers are rendered)
    /// - each `errors` entry may be a list of strings or a single string;
    ///   entries of any other shape are dropped
    pub fn from_slice(body: &[u8]) -> Self {
        use serde_json::Value;

        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body)
        else {
            return Self::default();
        };

        let message = map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_owned);

        let code = match map.get("code") {
            Some(Value::String(code)) if !code.is_empty() => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        };

        let errors = map.get("errors").and_then(Value::as_object).map(|fields| {
            fields
                .iter()
                .filter_map(|(field, value)| {
                    let messages = match value {
                        Value::String(msg) => vec![msg.clone()],
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect(),
                        _ => return None,
                    };
                    Some((field.clone(), messages))
                })
                .collect::<FieldErrors>()
        });

        Self {
            message,
            code,
            errors,
        }
    }
}
