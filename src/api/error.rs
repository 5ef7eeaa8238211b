use serde_json::Value;
use thiserror::Error;

/// Fallback message for error bodies without a `detail` field.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// ApiError
///
/// Every way an upstream call can fail. Views turn all of them into an inline
/// banner; none of them reach a global handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is already normalized for display.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body does not match the expected schema.
    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request rejected before it was sent (missing required field).
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Builds the `Status` variant from a raw error body.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<Value>(body) {
            Ok(payload) => error_message(&payload),
            Err(_) => format!("Request failed with status {}", status),
        };
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the upstream rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// error_message
///
/// Normalizes an upstream error payload into one human-readable string.
/// `detail` is either a plain string or a list of validation entries shaped
/// `{"loc": [...], "msg": "..."}`; each entry renders as `"<field>: <msg>"`.
/// A null, blank or empty `detail` counts as missing.
pub fn error_message(payload: &Value) -> String {
    match payload.get("detail") {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Array(entries)) if !entries.is_empty() => entries
            .iter()
            .map(validation_entry)
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Object(fields)) if fields.is_empty() => UNEXPECTED_ERROR.to_string(),
        Some(other @ (Value::Object(_) | Value::Bool(_) | Value::Number(_))) => other.to_string(),
        _ => UNEXPECTED_ERROR.to_string(),
    }
}

fn validation_entry(entry: &Value) -> String {
    let msg = match entry.get("msg") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => entry.to_string(),
    };

    let field = entry
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.get(1).or_else(|| loc.last()))
        .map(|part| match part {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        });

    match field {
        Some(field) => format!("{}: {}", field, msg),
        None => msg,
    }
}
