//! Fake Scryfall server for integration tests
//!
//! Serves `/cards/named?exact=` and `/cards/named?fuzzy=` from in-memory
//! card tables on an ephemeral localhost port. Misses answer the way the
//! real service does (404 with an error object); individual names can be
//! configured to return an error object with a 200 status or a 500 with a
//! non-JSON body.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One received request: (mode, decoded card name)
pub type RecordedRequest = (String, String);

#[derive(Default)]
struct Catalog {
    exact: HashMap<String, Value>,
    fuzzy: HashMap<String, Value>,
    error_payload_ok: HashSet<String>,
    server_error: HashSet<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Deserialize)]
struct NamedQuery {
    exact: Option<String>,
    fuzzy: Option<String>,
}

/// Builder for [`FakeScryfall`]
#[derive(Default)]
pub struct FakeScryfallBuilder {
    catalog: Catalog,
}

impl FakeScryfallBuilder {
    /// Card served for exact lookups of `name` (and fuzzy lookups too)
    pub fn card(mut self, name: &str, card: Value) -> Self {
        self.catalog.exact.insert(name.to_string(), card.clone());
        self.catalog.fuzzy.insert(name.to_string(), card);
        self
    }

    /// Card served only for fuzzy lookups of `name`
    pub fn fuzzy_only(mut self, name: &str, card: Value) -> Self {
        self.catalog.fuzzy.insert(name.to_string(), card);
        self
    }

    /// Answer `name` with 200 and an error object
    pub fn error_payload_ok(mut self, name: &str) -> Self {
        self.catalog.error_payload_ok.insert(name.to_string());
        self
    }

    /// Answer `name` with 500 and a non-JSON body
    pub fn server_error(mut self, name: &str) -> Self {
        self.catalog.server_error.insert(name.to_string());
        self
    }

    pub async fn start(self) -> Result<FakeScryfall> {
        let catalog = Arc::new(self.catalog);
        let app = Router::new()
            .route("/cards/named", get(named))
            .with_state(Arc::clone(&catalog));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(FakeScryfall { addr, catalog })
    }
}

/// Running fake server
pub struct FakeScryfall {
    addr: SocketAddr,
    catalog: Arc<Catalog>,
}

impl FakeScryfall {
    pub fn builder() -> FakeScryfallBuilder {
        FakeScryfallBuilder::default()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.catalog.requests.lock().unwrap().clone()
    }

    /// Requests received for one card name
    pub fn requests_for(&self, name: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(_, n)| n == name)
            .map(|(mode, _)| mode)
            .collect()
    }
}

async fn named(State(catalog): State<Arc<Catalog>>, Query(query): Query<NamedQuery>) -> Response {
    let (mode, name, table) = match (query.exact, query.fuzzy) {
        (Some(name), _) => ("exact", name, &catalog.exact),
        (None, Some(name)) => ("fuzzy", name, &catalog.fuzzy),
        (None, None) => {
            return (StatusCode::BAD_REQUEST, Json(error_object(400, "bad_request", "Missing name")))
                .into_response()
        }
    };

    catalog
        .requests
        .lock()
        .unwrap()
        .push((mode.to_string(), name.clone()));

    if catalog.server_error.contains(&name) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream exploded</html>").into_response();
    }

    if catalog.error_payload_ok.contains(&name) {
        let details = format!("No cards found matching “{}”", name);
        return (StatusCode::OK, Json(error_object(404, "not_found", &details))).into_response();
    }

    match table.get(&name) {
        Some(card) => (StatusCode::OK, Json(card.clone())).into_response(),
        None => {
            let details = format!("No cards found matching “{}”", name);
            (StatusCode::NOT_FOUND, Json(error_object(404, "not_found", &details))).into_response()
        }
    }
}

fn error_object(status: u16, code: &str, details: &str) -> Value {
    json!({
        "object": "error",
        "code": code,
        "status": status,
        "details": details,
    })
}

/// Single-faced card payload
pub fn card_json(name: &str, type_line: &str, oracle_text: &str) -> Value {
    json!({
        "object": "card",
        "name": name,
        "type_line": type_line,
        "oracle_text": oracle_text,
    })
}

/// Multi-faced card payload (no top-level oracle text)
pub fn faced_card_json(name: &str, faces: &[(&str, &str)]) -> Value {
    let type_line = faces
        .iter()
        .map(|(t, _)| *t)
        .collect::<Vec<_>>()
        .join(" // ");
    let card_faces: Vec<Value> = faces
        .iter()
        .map(|(t, o)| json!({ "object": "card_face", "type_line": t, "oracle_text": o }))
        .collect();

    json!({
        "object": "card",
        "name": name,
        "type_line": type_line,
        "card_faces": card_faces,
    })
}
