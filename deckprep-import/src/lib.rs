//! deckprep-import library
//!
//! Deck list import pipeline:
//! - [`normalizer`]: pasted text → [`DeckEntry`] records
//! - [`enricher`]: card metadata lookup with exact → fuzzy fallback
//! - [`classifier`]: Land / Nonland buckets with totals
//! - [`session`]: caller-owned state with stale-result suppression

pub mod classifier;
pub mod config;
pub mod enricher;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod scryfall_client;
pub mod session;
pub mod types;

pub use crate::classifier::classify;
pub use crate::enricher::Enricher;
pub use crate::error::{ImportError, ImportResult};
pub use crate::normalizer::normalize;
pub use crate::scryfall_client::ScryfallClient;
pub use crate::session::{ImportSession, SessionSnapshot};
pub use crate::types::{
    AnnotatedEntry, Bucket, BucketKind, CardLookup, Classification, DeckEntry,
};

use deckprep_common::config::TomlConfig;
use std::sync::Arc;

/// Build a Scryfall-backed enricher from bootstrap config
pub fn scryfall_enricher(toml_config: &TomlConfig) -> ImportResult<Enricher<ScryfallClient>> {
    let service_config = config::resolve_service_config(toml_config);
    let client = ScryfallClient::new(&service_config)?;
    Ok(Enricher::new(Arc::new(client)))
}

/// Build a Scryfall-backed import session from bootstrap config
pub fn scryfall_session(toml_config: &TomlConfig) -> ImportResult<ImportSession<ScryfallClient>> {
    Ok(ImportSession::new(scryfall_enricher(toml_config)?))
}
