//! Card Metadata Enricher
//!
//! Resolves every [`DeckEntry`] against a [`CardLookup`] source and merges
//! the card's base types and oracle text into an [`AnnotatedEntry`].
//!
//! # Lookup Strategy
//! 1. Exact-name lookup
//! 2. On any failure: fuzzy lookup with the same name
//! 3. Both failed: degraded entry (`lookup_succeeded == false`)
//!
//! # Parallel Execution
//! All entries are looked up concurrently and joined with an all-settled
//! barrier. Per-entry error isolation: a failed lookup degrades only its own
//! entry. Output order always matches input order.

use crate::types::{AnnotatedEntry, CardData, CardLookup, DeckEntry, LookupError};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Top-level card categories kept from a type line
pub const BASE_TYPES: [&str; 8] = [
    "Land",
    "Creature",
    "Artifact",
    "Enchantment",
    "Instant",
    "Sorcery",
    "Planeswalker",
    "Battle",
];

/// Separates base types from subtypes in a type line
const TYPE_LINE_DASH: char = '—';

/// Joins the oracle text of multiple faces
const FACE_SEPARATOR: &str = " // ";

/// Parallel card enricher
pub struct Enricher<L: CardLookup + ?Sized> {
    lookup: Arc<L>,
}

impl<L: CardLookup + ?Sized> Clone for Enricher<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: CardLookup + ?Sized> Enricher<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    /// Enrich all entries concurrently
    ///
    /// Returns exactly one annotated entry per input entry, in input order,
    /// once every lookup has settled. Never fails.
    pub async fn enrich(&self, entries: &[DeckEntry]) -> Vec<AnnotatedEntry> {
        let futures = entries.iter().map(|entry| self.enrich_one(entry));
        let annotated = join_all(futures).await;

        let failed = annotated.iter().filter(|e| !e.lookup_succeeded).count();
        debug!(
            source = self.lookup.name(),
            total = annotated.len(),
            failed,
            "Enrichment settled"
        );

        annotated
    }

    /// Enrich a single entry; failures degrade instead of propagating
    pub async fn enrich_one(&self, entry: &DeckEntry) -> AnnotatedEntry {
        if entry.card_name.is_empty() {
            debug!(quantity = entry.quantity, "Skipping lookup for entry with empty name");
            return AnnotatedEntry::degraded(entry);
        }

        match self.resolve(&entry.card_name).await {
            Ok(card) => {
                let card_type = display_type(&card);
                let oracle_text = normalize_oracle(&raw_oracle_text(&card));
                AnnotatedEntry::resolved(entry, card_type, oracle_text)
            }
            Err(e) => {
                warn!(
                    source = self.lookup.name(),
                    card_name = %entry.card_name,
                    error = %e,
                    "Lookup failed for card (per-entry error isolation)"
                );
                AnnotatedEntry::degraded(entry)
            }
        }
    }

    /// Exact lookup with fuzzy fallback
    async fn resolve(&self, card_name: &str) -> Result<CardData, LookupError> {
        match self.lookup.lookup_exact(card_name).await {
            Ok(card) => Ok(card),
            Err(e) => {
                debug!(
                    card_name = %card_name,
                    error = %e,
                    "Exact lookup missed, trying fuzzy match"
                );
                self.lookup.lookup_fuzzy(card_name).await
            }
        }
    }
}

/// Oracle text before normalization
///
/// The card's own `oracle_text` when non-empty, else the non-empty face
/// texts joined with `" // "`.
pub fn raw_oracle_text(card: &CardData) -> String {
    if let Some(text) = card.oracle_text.as_deref().filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    card.card_faces
        .as_deref()
        .map(|faces| {
            faces
                .iter()
                .filter_map(|f| f.oracle_text.as_deref())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(FACE_SEPARATOR)
        })
        .unwrap_or_default()
}

/// Join oracle lines into sentences
///
/// Lines are trimmed, empty ones dropped, and a period appended to any line
/// not already ending in `.`, `!` or `?`.
pub fn normalize_oracle(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.ends_with(['.', '!', '?']) {
                line.to_string()
            } else {
                format!("{}.", line)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base type string for a card (first face for multi-faced cards)
pub fn display_type(card: &CardData) -> String {
    let front_face_type = card
        .card_faces
        .as_deref()
        .and_then(|faces| faces.first())
        .and_then(|face| face.type_line.as_deref())
        .filter(|t| !t.is_empty());

    match front_face_type {
        Some(type_line) => strip_to_base_types(type_line),
        None => strip_to_base_types(card.type_line.as_deref().unwrap_or_default()),
    }
}

/// `"Legendary Artifact Creature — Golem"` -> `"Artifact Creature"`
///
/// Falls back to the whole pre-dash text when it holds no base type.
pub fn strip_to_base_types(type_line: &str) -> String {
    let left = type_line
        .split(TYPE_LINE_DASH)
        .next()
        .unwrap_or_default()
        .trim();

    let kept: Vec<&str> = left
        .split_whitespace()
        .filter(|word| BASE_TYPES.contains(word))
        .collect();

    if kept.is_empty() {
        left.to_string()
    } else {
        kept.join(" ")
    }
}
