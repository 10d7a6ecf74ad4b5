//! # Deckprep Common Library
//!
//! Shared code for the deckprep crates:
//! - Error and result types
//! - Bootstrap configuration loading (TOML)
//! - Logging configuration

pub mod config;
pub mod error;

pub use error::{Error, Result};
