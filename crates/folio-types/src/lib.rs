//! Foundation types for folio.
//!
//! This crate contains the platform-agnostic types shared by all folio
//! crates: colors, input events, configuration and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod input;
