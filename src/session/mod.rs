pub mod context;
pub mod store;

pub use context::*;
pub use store::*;
