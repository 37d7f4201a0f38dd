//! Core utilities for the Golay link workspace
//!
//! This crate provides the foundation types used across the coding stack:
//! - BitBuffer for bit-level payload manipulation
//! - CodecErr, the shared error taxonomy of the coding engine
//! - Logging setup helpers

pub mod bitbuffer;
pub mod debug;
pub mod error;

// Re-export commonly used items
pub use bitbuffer::BitBuffer;
pub use error::CodecErr;
