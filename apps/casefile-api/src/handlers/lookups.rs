//! Lookup directories and the case activity log.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use case_types::activity::verify_chain;

use crate::error::ApiError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let rows: Vec<ProfileResponse> =
        sqlx::query_as("SELECT id, name, designation, post, zone FROM profiles ORDER BY name")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

pub async fn list_railway_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RailwayPostResponse>>, ApiError> {
    let rows: Vec<RailwayPostResponse> =
        sqlx::query_as("SELECT id, name, division, zone FROM railway_posts ORDER BY name")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

pub async fn list_law_sections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LawSectionResponse>>, ApiError> {
    let rows: Vec<LawSectionResponse> =
        sqlx::query_as("SELECT id, act, section, description FROM law_sections ORDER BY act, section")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

pub async fn case_activity(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<ActivityResponse>, ApiError> {
    queries::fetch_case(&state.db, &case_id).await?;

    let rows: Vec<ActivityRow> = sqlx::query_as(
        r#"
        SELECT entry_id, case_id, actor, action_json, detail, timestamp, previous_hash
        FROM activity_logs
        WHERE case_id = ?
        ORDER BY id
        "#,
    )
    .bind(&case_id)
    .fetch_all(&state.db)
    .await?;

    let entries = rows
        .iter()
        .map(queries::entry_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    let chain_intact = verify_chain(&entries).is_ok();

    Ok(Json(ActivityResponse {
        entries,
        chain_intact,
    }))
}
