//! Agent export bridge
//!
//! Loads third-party agent exports (entity files with synonyms, intent files
//! with tagged utterances) into anything implementing `IntentEngine`.

pub mod schema;
pub mod adapter;

pub use schema::*;
pub use adapter::*;
