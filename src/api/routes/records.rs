//! Record category endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::leaderboard::{record_board, RecordBoardEntry};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let mut categories: Vec<String> = state.snapshot.records.keys().cloned().collect();
    categories.sort();
    Json(CategoriesResponse { categories })
}

#[derive(Debug, Serialize)]
pub struct RecordBoardResponse {
    pub category: String,
    pub entries: Vec<RecordBoardEntry>,
}

pub async fn category_board(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<RecordBoardResponse>, ApiError> {
    if !state.snapshot.records.contains_key(&category) {
        return Err(ApiError::NotFound(format!(
            "record category \"{category}\" not found"
        )));
    }

    Ok(Json(RecordBoardResponse {
        entries: record_board(&state.snapshot, &category),
        category,
    }))
}
