//! swear-jar/crates/sj-core/src/lib.rs
//!
//! Domain models, port traits and the error taxonomy for swear-jar.

pub mod error;
pub mod models;
pub mod scoring;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
