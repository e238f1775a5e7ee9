// Error and degradation types shared by every normalizer
use serde::Serialize;
use thiserror::Error;

// Errors raised while ingesting raw text (records, catalogs, config)
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid shape: expected {expected}, found {found}")]
    InvalidShape {
        expected: &'static str,
        found: &'static str,
    },
}

// A value that could not be computed. Normalizers never fail; they record one of
// these next to the placeholder they rendered instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degraded {
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("malformed timestamp: {raw}")]
    MalformedTimestamp { raw: String },

    #[error("malformed duration: {raw}")]
    MalformedDuration { raw: String },

    #[error("negative interval of {minutes} minutes")]
    NegativeInterval { minutes: i64 },

    #[error("missing {category} payload")]
    MissingPayload { category: &'static str },
}

pub type Resolution<T> = Result<T, Degraded>;

// Name of the JSON type of `value`, used in shape errors
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
