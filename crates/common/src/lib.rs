//! Reelforge Common Utilities
//!
//! Shared infrastructure for all Reelforge crates:
//! - Error types and result aliases
//! - Presentation clocks for frame scheduling
//! - Output profile and logging configuration
//! - Tracing/logging initialization

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
