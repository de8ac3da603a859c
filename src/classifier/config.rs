//! Configuration types and defaults for the document classifier

use serde::{Deserialize, Serialize};

use crate::error::NluError;
use crate::text::{FilterKind, StemmerKind, TokenFilter};

/// Label of the implicit empty document trained at construction
pub const NONE_LABEL: &str = "none";

/// Classifier configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Stemmer applied to each kept token. Default: porter
    pub stemmer: StemmerKind,
    /// Token filter applied before stemming. Default: basic
    pub filter: FilterKind,
    /// Shortest token kept by the basic filter. Default: 3
    pub min_token_len: usize,
    /// Label of the implicit empty document. Default: "none"
    pub none_label: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            stemmer: StemmerKind::Porter,
            filter: FilterKind::Basic,
            min_token_len: 3,
            none_label: NONE_LABEL.to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Tokens verbatim: no stemming, no filtering
    pub fn raw() -> Self {
        Self {
            stemmer: StemmerKind::None,
            filter: FilterKind::None,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, NluError> {
        serde_json::from_str(json).map_err(|e| NluError::Config(e.to_string()))
    }

    pub fn token_filter(&self) -> TokenFilter {
        TokenFilter::new(self.filter, self.min_token_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.stemmer, StemmerKind::Porter);
        assert_eq!(config.filter, FilterKind::Basic);
        assert_eq!(config.min_token_len, 3);
        assert_eq!(config.none_label, "none");
    }

    #[test]
    fn test_partial_json() {
        let config = ClassifierConfig::from_json(r#"{"stemmer": "none", "min_token_len": 2}"#).unwrap();
        assert_eq!(config.stemmer, StemmerKind::None);
        assert_eq!(config.filter, FilterKind::Basic);
        assert_eq!(config.min_token_len, 2);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            ClassifierConfig::from_json(r#"{"stemmer": "snowball"}"#),
            Err(NluError::Config(_))
        ));
    }
}
