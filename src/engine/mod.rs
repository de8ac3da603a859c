//! NluEngine: entity extraction, intent classification and session context
//! in one `process()` call per conversational turn

pub mod settings;
pub mod nlu;

pub use settings::*;
pub use nlu::*;

#[cfg(test)]
mod tests;
