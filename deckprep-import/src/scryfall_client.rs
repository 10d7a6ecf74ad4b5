//! Scryfall API client
//!
//! Resolves card names against the `/cards/named` endpoint in its two modes:
//! - `?exact=<name>`: exact name match
//! - `?fuzzy=<name>`: misspelling-tolerant match, used as fallback
//!
//! A miss is reported either as a non-2xx status or as an error-shaped
//! payload (`{"object": "error", "details": "..."}`); both map to
//! [`LookupError`]. No retries, no rate limiting.

use crate::config::ServiceConfig;
use crate::types::{CardData, CardLookup, LookupError};
use serde::Deserialize;
use tracing::debug;

const NAMED_ENDPOINT: &str = "/cards/named";

/// Named-lookup mode, used as the query parameter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    Exact,
    Fuzzy,
}

impl MatchMode {
    fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Fuzzy => "fuzzy",
        }
    }
}

/// Error-shaped payload
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Top-level payload; `object` distinguishes cards from errors
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    object: Option<String>,
}

/// Scryfall API client
pub struct ScryfallClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ScryfallClient {
    /// Build a client from resolved service settings
    pub fn new(config: &ServiceConfig) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn lookup_named(&self, mode: MatchMode, card_name: &str) -> Result<CardData, LookupError> {
        let url = format!("{}{}", self.base_url, NAMED_ENDPOINT);

        debug!(card_name = %card_name, mode = mode.as_str(), "Querying Scryfall");

        // reqwest URL-encodes query values
        let response = self
            .http_client
            .get(&url)
            .query(&[(mode.as_str(), card_name)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(payload) = serde_json::from_str::<ErrorPayload>(&body) {
                if status.as_u16() == 404 || payload.code.as_deref() == Some("not_found") {
                    return Err(LookupError::NotFound(
                        payload.details.unwrap_or_else(|| card_name.to_string()),
                    ));
                }
            }
            return Err(LookupError::Api(status.as_u16(), body));
        }

        parse_card(&body)
    }
}

/// Decode a 2xx body, rejecting error-shaped payloads
fn parse_card(body: &str) -> Result<CardData, LookupError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;

    if envelope.object.as_deref() == Some("error") {
        let payload: ErrorPayload =
            serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
        let details = payload
            .details
            .unwrap_or_else(|| "Scryfall error".to_string());
        return Err(match payload.status {
            Some(status) if status != 404 => LookupError::Api(status, details),
            _ => LookupError::Service(details),
        });
    }

    serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl CardLookup for ScryfallClient {
    fn name(&self) -> &'static str {
        "Scryfall"
    }

    async fn lookup_exact(&self, card_name: &str) -> Result<CardData, LookupError> {
        self.lookup_named(MatchMode::Exact, card_name).await
    }

    async fn lookup_fuzzy(&self, card_name: &str) -> Result<CardData, LookupError> {
        self.lookup_named(MatchMode::Fuzzy, card_name).await
    }
}
