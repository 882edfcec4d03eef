//! Challan handlers: draft saves always succeed, finalization consults the
//! eligibility gate.

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use case_types::{signature::validate_signature_png, ActivityAction};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workflow_engine::{advance_status, check_challan_finalize, CaseEvent, WorkflowError};

use crate::error::ApiError;
use crate::models::*;
use crate::queries;
use crate::state::AppState;

pub async fn upsert_challan(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
    Json(req): Json<UpsertChallanRequest>,
) -> Result<Json<ChallanResponse>, ApiError> {
    let case = queries::fetch_case(&state.db, &case_id).await?;

    // Status check runs before any write so a rejected save (e.g. on a
    // closed case) leaves the stored challan untouched.
    advance_status(case.status(), CaseEvent::ChallanDrafted)?;

    let existing = queries::fetch_challan(&state.db, &case_id).await?;
    if let Some(row) = &existing {
        if row.is_completed && !req.complete {
            return Err(WorkflowError::CompletionNotReversible.into());
        }
    }

    // The gate: every accused must have all five memos complete before the
    // challan can be finalized. Draft saves skip this entirely.
    if req.complete {
        let docs = queries::accused_documents(&state.db, &case_id).await?;
        check_challan_finalize(&docs)?;
    }

    let signature = match req.signature_png.as_deref() {
        None => None,
        Some(encoded) => {
            let data = BASE64
                .decode(encoded)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid signature base64: {}", e)))?;
            validate_signature_png(&data)
                .map_err(|msg| ApiError::InvalidRequest(msg.to_string()))?;
            Some(data)
        }
    };

    let fields_json =
        serde_json::to_string(&req.fields).map_err(|e| ApiError::Internal(e.into()))?;
    let now = Utc::now().to_rfc3339();

    match &existing {
        Some(row) => {
            sqlx::query(
                r#"
                UPDATE accused_challans
                SET fields_json = ?, signature_png = COALESCE(?, signature_png),
                    is_completed = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&fields_json)
            .bind(&signature)
            .bind(req.complete)
            .bind(&now)
            .bind(&row.id)
            .execute(&state.db)
            .await?;
        }
        None => {
            sqlx::query(
                r#"
                INSERT INTO accused_challans (id, case_id, fields_json, signature_png,
                                              is_completed, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&case_id)
            .bind(&fields_json)
            .bind(&signature)
            .bind(req.complete)
            .bind(&now)
            .bind(&now)
            .execute(&state.db)
            .await?;
        }
    }

    // Draft saves park the case at pending approval; finalization approves.
    let case = if case.status() < case_types::CaseStatus::PendingApproval {
        queries::apply_case_event(&state.db, &case, CaseEvent::ChallanDrafted).await?;
        queries::fetch_case(&state.db, &case_id).await?
    } else {
        case
    };
    if req.complete {
        queries::apply_case_event(&state.db, &case, CaseEvent::ChallanFinalized).await?;
    }

    let action = if req.complete {
        ActivityAction::ChallanFinalized
    } else {
        ActivityAction::ChallanSaved
    };
    queries::append_activity(&state.db, &case_id, &req.actor, action, None).await?;

    tracing::info!(
        "Saved challan for case {} (complete: {})",
        case_id,
        req.complete
    );

    let row = queries::fetch_challan(&state.db, &case_id)
        .await?
        .ok_or_else(|| ApiError::ChallanNotFound(case_id.clone()))?;

    Ok(Json(ChallanResponse {
        case_id: row.case_id,
        is_completed: row.is_completed,
        has_signature: row.signature_png.is_some(),
        fields: serde_json::from_str(&row.fields_json).map_err(|e| ApiError::Internal(e.into()))?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub async fn get_challan(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<ChallanResponse>, ApiError> {
    queries::fetch_case(&state.db, &case_id).await?;
    let row = queries::fetch_challan(&state.db, &case_id)
        .await?
        .ok_or_else(|| ApiError::ChallanNotFound(case_id.clone()))?;

    Ok(Json(ChallanResponse {
        case_id: row.case_id,
        is_completed: row.is_completed,
        has_signature: row.signature_png.is_some(),
        fields: serde_json::from_str(&row.fields_json).map_err(|e| ApiError::Internal(e.into()))?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
