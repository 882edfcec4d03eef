//! Accused registration handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use case_types::ActivityAction;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

pub async fn add_accused(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
    Json(req): Json<AddAccusedRequest>,
) -> Result<Json<AccusedResponse>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Accused name is required".into()));
    }

    // Case must exist before accused can be attached.
    queries::fetch_case(&state.db, &case_id).await?;

    let accused_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO accused (id, case_id, name, parentage, address, age, gender, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&accused_id)
    .bind(&case_id)
    .bind(req.name.trim())
    .bind(&req.parentage)
    .bind(&req.address)
    .bind(req.age as i64)
    .bind(&req.gender)
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    queries::append_activity(
        &state.db,
        &case_id,
        &req.actor,
        ActivityAction::AccusedAdded {
            accused_id: accused_id.clone(),
        },
        Some(format!("Accused {} added", req.name.trim())),
    )
    .await?;

    let row = queries::fetch_accused(&state.db, &case_id, &accused_id).await?;
    Ok(Json(AccusedResponse::from(&row)))
}

pub async fn list_accused(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<Vec<AccusedResponse>>, ApiError> {
    queries::fetch_case(&state.db, &case_id).await?;
    let rows = queries::list_accused(&state.db, &case_id).await?;
    Ok(Json(rows.iter().map(AccusedResponse::from).collect()))
}
