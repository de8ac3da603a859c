//! KittNLU: Rule-based Entity Recognition + Intent Classification
//!
//! A Rust/WASM implementation of the KittClouds conversational understanding layer.
//!
//! # Architecture
//!
//! ## Entity Components
//! - `text` - Cleaning, tokenizing, offset-mapped folding, span trimming, stemming
//! - `entity` - Recognizer family (string/synonym, regex, numeric, e-mail, free text)
//! - `entity::resolve` - Greedy conflict resolution over pooled candidates
//!
//! ## Classification + Context
//! - `classifier` - Incrementally trainable multi-label document classifier
//! - `session` - Per-session slot memory and the explicit/remembered merge rules
//!
//! ## Integration
//! - `bridge` - Loads third-party agent exports into any `IntentEngine`
//! - `engine` - NluEngine: one `process()` call per conversational turn
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { NluEngine } from 'kittnlu';
//!
//! await init();
//!
//! const engine = new NluEngine({ carry_context: true });
//! engine.loadSystemEntities();
//! engine.addSynonyms('city', [{ id: 'nyc', synonyms: ['New York', 'NYC'] }]);
//! engine.addDocument('book a table in {city}', 'book_table');
//!
//! const turn = engine.process('session-1', 'Book a table in NYC for 4');
//! console.log(turn.intent);   // { label: 'book_table', score: 0.9 }
//! console.log(turn.context);  // { city: 'nyc', sys_number: 4 }
//! ```

pub mod error;
pub mod text;
pub mod entity;
pub mod classifier;
pub mod session;
pub mod bridge;
pub mod engine;

// Public exports
pub use error::*;
pub use text::*;
pub use entity::*;
pub use classifier::*;
pub use session::*;
pub use bridge::*;
pub use engine::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("kittnlu v{}", env!("CARGO_PKG_VERSION"))
}
