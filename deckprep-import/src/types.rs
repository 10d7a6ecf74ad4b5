//! Core Types and Trait Definitions for deckprep-import
//!
//! Records flowing through the three pipeline stages:
//! - **Normalizer:** raw text → [`DeckEntry`]
//! - **Enricher:** [`DeckEntry`] → [`AnnotatedEntry`] (via [`CardLookup`])
//! - **Classifier:** [`AnnotatedEntry`] → [`Classification`]
//!
//! Entries serialize with the deck-export keys (`"Card Name"`, `"Quantity"`, ...)
//! so a bucket can be copied straight out as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Pipeline Records
// ============================================================================

/// One card line of a deck list: name plus copy count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Card name with set codes, collector numbers and flags peeled off
    #[serde(rename = "Card Name")]
    pub card_name: String,
    /// Number of copies (1 when the line carries no leading count)
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

impl DeckEntry {
    pub fn new(card_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            card_name: card_name.into(),
            quantity,
        }
    }
}

/// Deck entry merged with card metadata
///
/// Always produced, one per [`DeckEntry`]. A failed lookup yields empty
/// `card_type`/`oracle_text` and `lookup_succeeded == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEntry {
    #[serde(rename = "Card Name")]
    pub card_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    /// Base types from the type line (e.g. "Creature", "Artifact Land")
    #[serde(rename = "Card Type")]
    pub card_type: String,
    /// Oracle text joined into prose
    #[serde(rename = "Oracle Text")]
    pub oracle_text: String,
    /// Free-form role annotation, left empty for the user to fill in
    #[serde(rename = "Function in the deck", default)]
    pub deck_function: String,
    /// Whether either lookup attempt resolved the card
    #[serde(skip)]
    pub lookup_succeeded: bool,
}

impl AnnotatedEntry {
    /// Record for an entry whose lookups both failed
    pub fn degraded(entry: &DeckEntry) -> Self {
        Self {
            card_name: entry.card_name.clone(),
            quantity: entry.quantity,
            card_type: String::new(),
            oracle_text: String::new(),
            deck_function: String::new(),
            lookup_succeeded: false,
        }
    }

    /// Record for a resolved entry
    pub fn resolved(entry: &DeckEntry, card_type: String, oracle_text: String) -> Self {
        Self {
            card_name: entry.card_name.clone(),
            quantity: entry.quantity,
            card_type,
            oracle_text,
            deck_function: String::new(),
            lookup_succeeded: true,
        }
    }

    /// Entries with a `Land` base type anywhere in `card_type`
    pub fn is_land(&self) -> bool {
        self.card_type.contains("Land")
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// Named partition of annotated entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketKind {
    Land,
    Nonland,
}

impl BucketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKind::Land => "Land",
            BucketKind::Nonland => "Nonland",
        }
    }
}

impl std::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries of one kind plus their aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub kind: BucketKind,
    pub entries: Vec<AnnotatedEntry>,
    /// Sum of member quantities
    pub total_quantity: u64,
    /// Member count (not deduplicated by name)
    pub unique_count: usize,
}

impl Bucket {
    /// Build a bucket, computing its aggregates
    pub fn new(kind: BucketKind, entries: Vec<AnnotatedEntry>) -> Self {
        let total_quantity = entries.iter().map(|e| u64::from(e.quantity)).sum();
        let unique_count = entries.len();
        Self {
            kind,
            entries,
            total_quantity,
            unique_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON array of the bucket's entries (deck-export shape)
    pub fn to_export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

/// Land / Nonland split of one annotated deck list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub land: Bucket,
    pub nonland: Bucket,
}

impl Classification {
    pub fn bucket(&self, kind: BucketKind) -> &Bucket {
        match kind {
            BucketKind::Land => &self.land,
            BucketKind::Nonland => &self.nonland,
        }
    }

    /// Quantity across both buckets
    pub fn total_quantity(&self) -> u64 {
        self.land.total_quantity + self.nonland.total_quantity
    }

    /// Entry count across both buckets
    pub fn unique_count(&self) -> usize {
        self.land.unique_count + self.nonland.unique_count
    }
}

// ============================================================================
// Card Metadata
// ============================================================================

/// Card object as returned by the metadata service
///
/// Only the fields the enricher consumes are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    /// Present for multi-faced cards (transform, split, modal)
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
}

/// Card lookup source
///
/// Implemented by [`crate::scryfall_client::ScryfallClient`] for the real
/// service and by in-memory doubles in tests.
#[async_trait::async_trait]
pub trait CardLookup: Send + Sync {
    /// Source name for log provenance
    fn name(&self) -> &'static str;

    /// Resolve a card by its exact name
    async fn lookup_exact(&self, card_name: &str) -> Result<CardData, LookupError>;

    /// Resolve a card by a best-effort, misspelling-tolerant match
    async fn lookup_fuzzy(&self, card_name: &str) -> Result<CardData, LookupError>;
}

/// Lookup error
///
/// Never escapes the enricher: every variant degrades a single entry.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// No card matched the name
    #[error("Card not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Error-shaped payload (`object: "error"`) with its `details`
    #[error("Service error: {0}")]
    Service(String),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}
