//! Case registration and lifecycle handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use case_types::ActivityAction;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workflow_engine::CaseEvent;

use crate::error::ApiError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

pub async fn create_case(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    if req.case_number.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Case number is required".into()));
    }

    let case_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO cases (id, case_number, railway_post, law_section, fir_number,
                           incident_description, status, registered_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 'draft', ?, ?)
        "#,
    )
    .bind(&case_id)
    .bind(req.case_number.trim())
    .bind(&req.railway_post)
    .bind(&req.law_section)
    .bind(&req.fir_number)
    .bind(&req.incident_description)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    queries::append_activity(
        &state.db,
        &case_id,
        &req.actor,
        ActivityAction::CaseRegistered,
        Some(format!("Case {} registered", req.case_number)),
    )
    .await?;

    tracing::info!("Registered case {} ({})", req.case_number, case_id);

    let row = queries::fetch_case(&state.db, &case_id).await?;
    Ok(Json(CaseResponse::from(&row)))
}

pub async fn list_cases(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CaseResponse>>, ApiError> {
    let rows: Vec<CaseRow> = sqlx::query_as(
        r#"
        SELECT id, case_number, railway_post, law_section, fir_number,
               incident_description, status, registered_at, updated_at
        FROM cases
        ORDER BY registered_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.iter().map(CaseResponse::from).collect()))
}

pub async fn get_case(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseDetailResponse>, ApiError> {
    let row = queries::fetch_case(&state.db, &case_id).await?;
    let accused = queries::list_accused(&state.db, &case_id).await?;

    Ok(Json(CaseDetailResponse {
        case: CaseResponse::from(&row),
        accused: accused.iter().map(AccusedResponse::from).collect(),
    }))
}

pub async fn close_case(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
    Json(req): Json<CloseCaseRequest>,
) -> Result<Json<CaseResponse>, ApiError> {
    let row = queries::fetch_case(&state.db, &case_id).await?;
    queries::apply_case_event(&state.db, &row, CaseEvent::Closed).await?;

    queries::append_activity(
        &state.db,
        &case_id,
        &req.actor,
        ActivityAction::CaseClosed,
        None,
    )
    .await?;

    let row = queries::fetch_case(&state.db, &case_id).await?;
    Ok(Json(CaseResponse::from(&row)))
}
