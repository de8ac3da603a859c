pub mod config;
pub mod storage;
pub mod math;
pub mod document;

pub use config::*;
pub use storage::*;
pub use math::*;
pub use document::*;
