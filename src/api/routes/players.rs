//! Player endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::player::{
    self, PlayerLookup, PlayerSummary, TestComparison, TestComparisonLookup, UnplayedReport,
};

pub async fn summary(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<PlayerSummary>, ApiError> {
    match player::summarize(&state.snapshot, &identity) {
        PlayerLookup::Found(summary) => Ok(Json(*summary)),
        PlayerLookup::NotFound { identity } => Err(ApiError::NotFound(format!(
            "player \"{identity}\" not found"
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct UnplayedResponse {
    pub player: String,
    #[serde(flatten)]
    pub report: UnplayedReport,
}

pub async fn unplayed(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<UnplayedResponse>, ApiError> {
    let card = state
        .snapshot
        .find_player(&identity)
        .ok_or_else(|| ApiError::NotFound(format!("player \"{identity}\" not found")))?;
    let player_name = card.player_name.clone();

    let report = player::unplayed_seeds(&state.snapshot, &identity)
        .ok_or_else(|| ApiError::NotFound(format!("player \"{identity}\" not found")))?;

    Ok(Json(UnplayedResponse {
        player: player_name,
        report,
    }))
}

pub async fn test_comparison(
    State(state): State<AppState>,
    Path((identity, test_id)): Path<(String, String)>,
) -> Result<Json<TestComparison>, ApiError> {
    match player::test_comparison(&state.snapshot, &identity, &test_id) {
        TestComparisonLookup::Found(comparison) => Ok(Json(comparison)),
        TestComparisonLookup::PlayerNotFound => Err(ApiError::NotFound(format!(
            "player \"{identity}\" not found"
        ))),
        TestComparisonLookup::NotParticipated => Err(ApiError::NotFound(format!(
            "player \"{identity}\" did not participate in test \"{test_id}\""
        ))),
    }
}
