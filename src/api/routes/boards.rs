//! Lifetime leaderboard endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::leaderboard::{
    accuracy_board, adjusted_accuracy_board, aggregate_board, high_score_board, streak_board,
    AggregateScope, BoardEntry, HighScoreEntry, StreakBoardEntry,
};
use crate::models::Mode;

#[derive(Debug, Deserialize)]
pub struct AccuracyParams {
    pub mode: Option<String>,
    pub adjusted: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    pub mode: Mode,
    pub adjusted: bool,
    pub entries: Vec<BoardEntry>,
}

pub async fn accuracy(
    State(state): State<AppState>,
    Query(params): Query<AccuracyParams>,
) -> Result<Json<AccuracyResponse>, ApiError> {
    let mode = parse_mode(params.mode.as_deref())?;
    let adjusted = params.adjusted.unwrap_or(false);

    let entries = if adjusted {
        adjusted_accuracy_board(&state.snapshot, mode)
    } else {
        accuracy_board(&state.snapshot, mode)
    };

    Ok(Json(AccuracyResponse {
        mode,
        adjusted,
        entries,
    }))
}

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub entries: Vec<StreakBoardEntry>,
}

pub async fn streaks(State(state): State<AppState>) -> Json<StreaksResponse> {
    Json(StreaksResponse {
        entries: streak_board(&state.snapshot),
    })
}

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub scope: String,
    pub entries: Vec<BoardEntry>,
}

pub async fn aggregate(
    State(state): State<AppState>,
    Query(params): Query<AggregateParams>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let scope_str = params.scope.as_deref().unwrap_or("games");
    let scope = AggregateScope::parse(scope_str)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown scope: {scope_str}")))?;

    Ok(Json(AggregateResponse {
        scope: scope_str.to_ascii_lowercase(),
        entries: aggregate_board(&state.snapshot, scope),
    }))
}

#[derive(Debug, Serialize)]
pub struct HighScoresResponse {
    pub entries: Vec<HighScoreEntry>,
}

pub async fn high_scores(State(state): State<AppState>) -> Json<HighScoresResponse> {
    Json(HighScoresResponse {
        entries: high_score_board(&state.snapshot),
    })
}

pub(super) fn parse_mode(mode: Option<&str>) -> Result<Mode, ApiError> {
    match mode {
        None => Ok(Mode::All),
        Some(s) => {
            Mode::parse(s).ok_or_else(|| ApiError::BadRequest(format!("unknown mode: {s}")))
        }
    }
}
