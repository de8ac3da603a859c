//! Crate-wide error type
//!
//! Recognition, classification and context merging never fail; errors only
//! surface from registration (bad patterns), configuration and agent-export
//! parsing.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum NluError {
    /// A regular expression supplied at registration time failed to compile
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An agent export document could not be parsed
    #[error("malformed agent export `{name}`: {source}")]
    Export {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Synonyms were added under a name held by a non-synonym recognizer
    #[error("entity `{name}` is a {kind} recognizer, not a synonym list")]
    NotSynonyms { name: String, kind: &'static str },

    /// Engine or classifier configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<NluError> for JsValue {
    fn from(err: NluError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Serialize a result for JS. Maps become plain objects, not `Map`s.
pub(crate) fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
