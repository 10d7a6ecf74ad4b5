//! Import session
//!
//! Holds the caller-side state of one deck list being edited: the latest
//! committed annotated entries and their classification.
//!
//! # Supersession
//! Every enrichment takes the next value of a monotonically increasing
//! generation counter. When it settles, its results are committed only if
//! no newer enrichment has started in the meantime; otherwise they are
//! discarded. In-flight requests are not cancelled, their results are just
//! ignored.

use crate::classifier::classify;
use crate::enricher::Enricher;
use crate::normalizer::normalize;
use crate::types::{AnnotatedEntry, CardLookup, Classification, DeckEntry};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Committed session state
#[derive(Debug)]
struct SessionState {
    /// Generation whose results are currently committed (0 = none yet)
    committed_generation: u64,
    entries: Vec<AnnotatedEntry>,
    classification: Classification,
    updated_at: Option<DateTime<Utc>>,
}

/// Point-in-time copy of a session's committed state
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Generation of the committed results
    pub generation: u64,
    pub entries: Vec<AnnotatedEntry>,
    pub classification: Classification,
    /// A newer enrichment than the committed one is outstanding
    pub loading: bool,
    /// When the committed results were produced
    pub updated_at: Option<DateTime<Utc>>,
}

/// Deck list import session
pub struct ImportSession<L: CardLookup + ?Sized> {
    id: Uuid,
    enricher: Enricher<L>,
    generation: AtomicU64,
    state: RwLock<SessionState>,
}

impl<L: CardLookup + ?Sized> ImportSession<L> {
    pub fn new(enricher: Enricher<L>) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "Import session created");

        Self {
            id,
            enricher,
            generation: AtomicU64::new(0),
            state: RwLock::new(SessionState {
                committed_generation: 0,
                entries: Vec::new(),
                classification: classify(&[]),
                updated_at: None,
            }),
        }
    }

    /// Session ID (log correlation)
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Latest generation started
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Normalize new deck list text and enrich it
    ///
    /// See [`ImportSession::enrich_latest`] for the return value.
    pub async fn update_text(&self, text: &str) -> Option<Classification> {
        self.enrich_latest(normalize(text)).await
    }

    /// Enrich `entries` as the newest generation
    ///
    /// Returns the committed classification, or `None` when a newer
    /// enrichment started before this one settled (results discarded).
    pub async fn enrich_latest(&self, entries: Vec<DeckEntry>) -> Option<Classification> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            session_id = %self.id,
            generation,
            entries = entries.len(),
            "Enrichment started"
        );

        let annotated = if entries.is_empty() {
            Vec::new()
        } else {
            self.enricher.enrich(&entries).await
        };

        let mut state = self.state.write().await;

        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            debug!(
                session_id = %self.id,
                generation,
                latest,
                "Discarding superseded enrichment results"
            );
            return None;
        }

        let classification = classify(&annotated);
        info!(
            session_id = %self.id,
            generation,
            lands = classification.land.total_quantity,
            nonlands = classification.nonland.total_quantity,
            failed = annotated.iter().filter(|e| !e.lookup_succeeded).count(),
            "Enrichment committed"
        );

        state.committed_generation = generation;
        state.entries = annotated;
        state.classification = classification.clone();
        state.updated_at = Some(Utc::now());

        Some(classification)
    }

    /// True while the newest enrichment has not been committed
    pub async fn is_loading(&self) -> bool {
        let state = self.state.read().await;
        state.committed_generation != self.current_generation()
    }

    /// Copy of the committed state
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            generation: state.committed_generation,
            entries: state.entries.clone(),
            classification: state.classification.clone(),
            loading: state.committed_generation != self.current_generation(),
            updated_at: state.updated_at,
        }
    }
}
