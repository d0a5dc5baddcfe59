pub mod rust;

/* Re-export main public types */
pub use rust::{EmitterOptions, RustEmitter};
