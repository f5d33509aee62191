//! Unified error types for VML geometry resolution.
//!
//! This module provides the single error type surfaced by the XML loader and
//! the geometry resolver, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
