pub mod types;
pub mod resolve;
pub mod string;
pub mod pattern;
pub mod numeric;
pub mod email;
pub mod free_text;
pub mod recognizer;
pub mod extractor;

pub use types::*;
pub use resolve::*;
pub use string::*;
pub use pattern::*;
pub use numeric::*;
pub use email::*;
pub use free_text::*;
pub use recognizer::*;
pub use extractor::*;
