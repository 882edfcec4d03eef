//! Memo upsert, retrieval, and per-accused completion handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use case_types::{signature::validate_signature_png, ActivityAction, MemoFields, MemoKind};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workflow_engine::{advance_status, validate_grounds, CaseEvent, GroundsPolicy, WorkflowError};

use crate::error::ApiError;
use crate::models::*;
use crate::queries::{self, memo_table};
use crate::state::AppState;

fn parse_kind(kind: &str) -> Result<MemoKind, ApiError> {
    MemoKind::parse(kind)
        .ok_or_else(|| ApiError::InvalidRequest(format!("Unknown memo kind: {}", kind)))
}

/// Decode and validate an optional base64 signature image.
fn decode_signature(signature_png: Option<&str>) -> Result<Option<Vec<u8>>, ApiError> {
    match signature_png {
        None => Ok(None),
        Some(encoded) => {
            let data = BASE64
                .decode(encoded)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid signature base64: {}", e)))?;
            validate_signature_png(&data)
                .map_err(|msg| ApiError::InvalidRequest(msg.to_string()))?;
            Ok(Some(data))
        }
    }
}

/// Upsert a memo draft, or finalize it when `complete` is true.
///
/// Finalization is one-way: a completed memo can be re-saved complete with
/// corrected fields, but never reverted to draft.
pub async fn upsert_memo(
    State(state): State<Arc<AppState>>,
    Path((case_id, accused_id, kind)): Path<(String, String, String)>,
    Json(req): Json<UpsertMemoRequest>,
) -> Result<Json<MemoResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    if req.fields.kind() != kind {
        return Err(ApiError::InvalidRequest(format!(
            "Field payload is for '{}', endpoint is '{}'",
            req.fields.kind(),
            kind
        )));
    }

    let case = queries::fetch_case(&state.db, &case_id).await?;
    queries::fetch_accused(&state.db, &case_id, &accused_id).await?;

    // Status check runs before any write so a rejected save (e.g. on a
    // closed case) leaves the stored memo untouched.
    advance_status(case.status(), CaseEvent::MemoSaved)?;

    let existing = queries::fetch_memo(&state.db, kind, &case_id, &accused_id).await?;
    if let Some(row) = &existing {
        if row.is_completed && !req.complete {
            return Err(WorkflowError::CompletionNotReversible.into());
        }
    }

    // The BNSS checklist gate: grounds are only enforced on finalize.
    if req.complete {
        if let MemoFields::BnssChecklist(fields) = &req.fields {
            validate_grounds(&fields.grounds_checked, GroundsPolicy::AllMandatory)?;
        }
    }

    let signature = decode_signature(req.signature_png.as_deref())?;
    let fields_json =
        serde_json::to_string(&req.fields).map_err(|e| ApiError::Internal(e.into()))?;
    let now = Utc::now().to_rfc3339();

    let memo_id = match &existing {
        Some(row) => {
            sqlx::query(&format!(
                r#"
                UPDATE {}
                SET fields_json = ?, signature_png = COALESCE(?, signature_png),
                    is_completed = ?, updated_at = ?
                WHERE id = ?
                "#,
                memo_table(kind)
            ))
            .bind(&fields_json)
            .bind(&signature)
            .bind(req.complete)
            .bind(&now)
            .bind(&row.id)
            .execute(&state.db)
            .await?;
            row.id.clone()
        }
        None => {
            let memo_id = Uuid::new_v4().to_string();
            sqlx::query(&format!(
                r#"
                INSERT INTO {} (id, case_id, accused_id, fields_json, signature_png,
                                is_completed, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                memo_table(kind)
            ))
            .bind(&memo_id)
            .bind(&case_id)
            .bind(&accused_id)
            .bind(&fields_json)
            .bind(&signature)
            .bind(req.complete)
            .bind(&now)
            .bind(&now)
            .execute(&state.db)
            .await?;
            memo_id
        }
    };

    queries::replace_memo_items(&state.db, &memo_id, &req.fields).await?;

    queries::apply_case_event(&state.db, &case, CaseEvent::MemoSaved).await?;

    // Forwarding every accused to court moves the case along.
    if req.complete && kind == MemoKind::CourtForwarding {
        let accused = queries::list_accused(&state.db, &case_id).await?;
        let mut all_forwarded = true;
        for a in &accused {
            let row = queries::fetch_memo(&state.db, kind, &case_id, &a.id).await?;
            if !row.map(|r| r.is_completed).unwrap_or(false) {
                all_forwarded = false;
                break;
            }
        }
        if all_forwarded {
            let case = queries::fetch_case(&state.db, &case_id).await?;
            queries::apply_case_event(&state.db, &case, CaseEvent::ForwardedToCourt).await?;
        }
    }

    let action = if req.complete {
        ActivityAction::MemoFinalized {
            kind,
            accused_id: accused_id.clone(),
        }
    } else {
        ActivityAction::MemoSaved {
            kind,
            accused_id: accused_id.clone(),
        }
    };
    queries::append_activity(&state.db, &case_id, &req.actor, action, None).await?;

    tracing::info!(
        "Saved {} memo for accused {} on case {} (complete: {})",
        kind,
        accused_id,
        case_id,
        req.complete
    );

    let row = queries::fetch_memo(&state.db, kind, &case_id, &accused_id)
        .await?
        .ok_or_else(|| ApiError::MemoNotFound(format!("{} for accused {}", kind, accused_id)))?;
    let fields = queries::load_memo_fields(&state.db, &row).await?;

    Ok(Json(MemoResponse {
        kind,
        case_id: row.case_id,
        accused_id: row.accused_id,
        is_completed: row.is_completed,
        has_signature: row.signature_png.is_some(),
        fields,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub async fn get_memo(
    State(state): State<Arc<AppState>>,
    Path((case_id, accused_id, kind)): Path<(String, String, String)>,
) -> Result<Json<MemoResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    queries::fetch_case(&state.db, &case_id).await?;
    queries::fetch_accused(&state.db, &case_id, &accused_id).await?;

    let row = queries::fetch_memo(&state.db, kind, &case_id, &accused_id)
        .await?
        .ok_or_else(|| ApiError::MemoNotFound(format!("{} for accused {}", kind, accused_id)))?;
    let fields = queries::load_memo_fields(&state.db, &row).await?;

    Ok(Json(MemoResponse {
        kind,
        case_id: row.case_id,
        accused_id: row.accused_id,
        is_completed: row.is_completed,
        has_signature: row.signature_png.is_some(),
        fields,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// The per-accused completion aggregator with its per-kind breakdown.
pub async fn get_completion(
    State(state): State<Arc<AppState>>,
    Path((case_id, accused_id)): Path<(String, String)>,
) -> Result<Json<CompletionResponse>, ApiError> {
    queries::fetch_case(&state.db, &case_id).await?;
    let accused = queries::fetch_accused(&state.db, &case_id, &accused_id).await?;

    let docs = queries::accused_documents(&state.db, &case_id)
        .await?
        .into_iter()
        .find(|d| d.accused_id == accused_id)
        .ok_or_else(|| ApiError::AccusedNotFound(accused_id.clone()))?;

    Ok(Json(CompletionResponse {
        accused_id: docs.accused_id.clone(),
        accused_name: accused.name,
        complete: docs.all_complete(),
        documents: MemoKind::REQUIRED_FOR_CHALLAN
            .iter()
            .map(|kind| DocStatus {
                kind: *kind,
                state: docs.state(*kind),
            })
            .collect(),
    }))
}
