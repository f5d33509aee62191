//! Common types and utilities shared by the XML layer and the geometry engine.

// Submodule declarations
pub mod error;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, Result};
pub use unit::Emu;
