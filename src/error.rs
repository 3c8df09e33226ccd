//! Error handling for encoder operations
//!
//! This module defines the error types used throughout the encoder.
//! It uses thiserror for ergonomic error handling and provides context-specific
//! error variants.

pub use crate::common::GifError;
pub use crate::common::Result;
