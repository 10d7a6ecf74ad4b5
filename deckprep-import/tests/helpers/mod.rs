//! Test Helper Utilities
//!
//! Shared utilities for testing deckprep-import

#![allow(dead_code)]

pub mod fake_scryfall;
pub mod log_capture;

pub use fake_scryfall::{FakeScryfall, FakeScryfallBuilder};
pub use log_capture::LogCapture;
