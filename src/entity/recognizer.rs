//! Closed set of recognizer variants

use super::email::EmailRecognizer;
use super::free_text::FreeTextRecognizer;
use super::numeric::NumericRecognizer;
use super::pattern::RegexRecognizer;
use super::string::StringRecognizer;
use super::types::{EntityMatch, Recognizer};

/// Any recognizer the extractor can hold
#[derive(Debug)]
pub enum EntityRecognizer {
    String(StringRecognizer),
    Regex(RegexRecognizer),
    Numeric(NumericRecognizer),
    Email(EmailRecognizer),
    FreeText(FreeTextRecognizer),
}

impl EntityRecognizer {
    fn as_dyn(&self) -> &dyn Recognizer {
        match self {
            EntityRecognizer::String(r) => r,
            EntityRecognizer::Regex(r) => r,
            EntityRecognizer::Numeric(r) => r,
            EntityRecognizer::Email(r) => r,
            EntityRecognizer::FreeText(r) => r,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EntityRecognizer::String(_) => "string",
            EntityRecognizer::Regex(_) => "regex",
            EntityRecognizer::Numeric(_) => "numeric",
            EntityRecognizer::Email(_) => "email",
            EntityRecognizer::FreeText(_) => "free_text",
        }
    }

    /// The `expand` capability, only free-text recognizers have it
    pub fn as_free_text(&self) -> Option<&FreeTextRecognizer> {
        match self {
            EntityRecognizer::FreeText(r) => Some(r),
            _ => None,
        }
    }
}

impl Recognizer for EntityRecognizer {
    fn name(&self) -> &str {
        self.as_dyn().name()
    }

    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>) {
        self.as_dyn().recognize(text, out)
    }
}

impl From<StringRecognizer> for EntityRecognizer {
    fn from(r: StringRecognizer) -> Self {
        EntityRecognizer::String(r)
    }
}

impl From<RegexRecognizer> for EntityRecognizer {
    fn from(r: RegexRecognizer) -> Self {
        EntityRecognizer::Regex(r)
    }
}

impl From<NumericRecognizer> for EntityRecognizer {
    fn from(r: NumericRecognizer) -> Self {
        EntityRecognizer::Numeric(r)
    }
}

impl From<EmailRecognizer> for EntityRecognizer {
    fn from(r: EmailRecognizer) -> Self {
        EntityRecognizer::Email(r)
    }
}

impl From<FreeTextRecognizer> for EntityRecognizer {
    fn from(r: FreeTextRecognizer) -> Self {
        EntityRecognizer::FreeText(r)
    }
}
