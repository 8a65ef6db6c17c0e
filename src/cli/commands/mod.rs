//! Command implementations.
//!
//! Each command runs one action, then renders the resulting slice through
//! its read accessors and returns the slice's final status.

pub mod ask;
pub mod files;
mod helpers;
pub mod search;
pub mod upload;
