pub mod normalize;
pub mod stem;
pub mod filter;

pub use normalize::*;
pub use stem::*;
pub use filter::*;
