//! Service health and snapshot diagnostics.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::snapshot::TableLoad;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub loaded_at: String,
    pub players: usize,
    pub seeds: usize,
    pub tests: usize,
    pub tables: Vec<TableLoad>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = &state.snapshot;
    Json(HealthResponse {
        status: "ok",
        loaded_at: snapshot.loaded_at.to_rfc3339(),
        players: snapshot.players.len(),
        seeds: snapshot.seeds.len(),
        tests: snapshot.tests.len(),
        tables: snapshot.load_report.clone(),
    })
}
