//! Shared database helpers.
//!
//! The six memo tables share one row shape, so most memo queries are built
//! from the table name for the kind. Table names come from the fixed
//! `MemoKind` enum, never from request input.

use case_types::{ActivityAction, ActivityEntry, MemoFields, MemoKind, PersonalSearchItem, SeizedItem};
use chrono::Utc;
use sqlx::SqlitePool;
use workflow_engine::{advance_status, AccusedDocuments, CaseEvent};

use crate::error::ApiError;
use crate::models::{AccusedRow, ActivityRow, CaseRow, ChallanRow, MemoRow};

pub fn memo_table(kind: MemoKind) -> &'static str {
    match kind {
        MemoKind::Seizure => "seizure_memos",
        MemoKind::Arrest => "arrest_memos",
        MemoKind::PersonalSearch => "personal_search_memos",
        MemoKind::Medical => "medical_memos",
        MemoKind::BnssChecklist => "bnss_checklist_memos",
        MemoKind::CourtForwarding => "court_forwarding_memos",
    }
}

const MEMO_COLUMNS: &str =
    "id, case_id, accused_id, fields_json, signature_png, is_completed, created_at, updated_at";

pub async fn fetch_case(pool: &SqlitePool, case_id: &str) -> Result<CaseRow, ApiError> {
    let row: Option<CaseRow> = sqlx::query_as(
        r#"
        SELECT id, case_number, railway_post, law_section, fir_number,
               incident_description, status, registered_at, updated_at
        FROM cases
        WHERE id = ?
        "#,
    )
    .bind(case_id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| ApiError::CaseNotFound(case_id.to_string()))
}

pub async fn fetch_accused(
    pool: &SqlitePool,
    case_id: &str,
    accused_id: &str,
) -> Result<AccusedRow, ApiError> {
    let row: Option<AccusedRow> = sqlx::query_as(
        r#"
        SELECT id, case_id, name, parentage, address, age, gender, created_at
        FROM accused
        WHERE id = ? AND case_id = ?
        "#,
    )
    .bind(accused_id)
    .bind(case_id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| ApiError::AccusedNotFound(accused_id.to_string()))
}

pub async fn list_accused(pool: &SqlitePool, case_id: &str) -> Result<Vec<AccusedRow>, ApiError> {
    let rows: Vec<AccusedRow> = sqlx::query_as(
        r#"
        SELECT id, case_id, name, parentage, address, age, gender, created_at
        FROM accused
        WHERE case_id = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(case_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn fetch_memo(
    pool: &SqlitePool,
    kind: MemoKind,
    case_id: &str,
    accused_id: &str,
) -> Result<Option<MemoRow>, ApiError> {
    let row: Option<MemoRow> = sqlx::query_as(&format!(
        "SELECT {} FROM {} WHERE case_id = ? AND accused_id = ?",
        MEMO_COLUMNS,
        memo_table(kind)
    ))
    .bind(case_id)
    .bind(accused_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn fetch_challan(
    pool: &SqlitePool,
    case_id: &str,
) -> Result<Option<ChallanRow>, ApiError> {
    let row: Option<ChallanRow> = sqlx::query_as(
        r#"
        SELECT id, case_id, fields_json, signature_png, is_completed, created_at, updated_at
        FROM accused_challans
        WHERE case_id = ?
        "#,
    )
    .bind(case_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Build the aggregator input for every accused on a case: one query per
/// memo table (fan-out), combined after all resolve.
pub async fn accused_documents(
    pool: &SqlitePool,
    case_id: &str,
) -> Result<Vec<AccusedDocuments>, ApiError> {
    let accused = list_accused(pool, case_id).await?;
    let mut docs: Vec<AccusedDocuments> = accused
        .iter()
        .map(|a| AccusedDocuments::new(&a.id, &a.name))
        .collect();

    for kind in MemoKind::REQUIRED_FOR_CHALLAN {
        let rows: Vec<(String, bool)> = sqlx::query_as(&format!(
            "SELECT accused_id, is_completed FROM {} WHERE case_id = ?",
            memo_table(kind)
        ))
        .bind(case_id)
        .fetch_all(pool)
        .await?;

        for (accused_id, is_completed) in rows {
            if let Some(entry) = docs.iter_mut().find(|d| d.accused_id == accused_id) {
                entry.set(kind, Some(is_completed));
            }
        }
    }

    Ok(docs)
}

/// Apply a workflow event to the case status, persisting when it changes.
pub async fn apply_case_event(
    pool: &SqlitePool,
    case: &CaseRow,
    event: CaseEvent,
) -> Result<case_types::CaseStatus, ApiError> {
    let current = case.status();
    let next = advance_status(current, event)?;
    if next != current {
        sqlx::query("UPDATE cases SET status = ?, updated_at = ? WHERE id = ?")
            .bind(next.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(&case.id)
            .execute(pool)
            .await?;
    }
    Ok(next)
}

/// Parse the stored fields, overlaying items from the child tables so the
/// item rows stay authoritative.
pub async fn load_memo_fields(
    pool: &SqlitePool,
    row: &MemoRow,
) -> Result<MemoFields, ApiError> {
    let mut fields: MemoFields =
        serde_json::from_str(&row.fields_json).map_err(|e| ApiError::Internal(e.into()))?;

    match &mut fields {
        MemoFields::Seizure(f) => {
            let items: Vec<(String, i64, f64)> = sqlx::query_as(
                "SELECT description, quantity, estimated_value FROM seized_items
                 WHERE memo_id = ? ORDER BY idx",
            )
            .bind(&row.id)
            .fetch_all(pool)
            .await?;
            f.items = items
                .into_iter()
                .map(|(description, quantity, estimated_value)| SeizedItem {
                    description,
                    quantity: quantity.max(0) as u32,
                    estimated_value,
                })
                .collect();
        }
        MemoFields::PersonalSearch(f) => {
            let items: Vec<(String, i64)> = sqlx::query_as(
                "SELECT description, quantity FROM personal_search_items
                 WHERE memo_id = ? ORDER BY idx",
            )
            .bind(&row.id)
            .fetch_all(pool)
            .await?;
            f.items = items
                .into_iter()
                .map(|(description, quantity)| PersonalSearchItem {
                    description,
                    quantity: quantity.max(0) as u32,
                })
                .collect();
        }
        _ => {}
    }

    Ok(fields)
}

/// Replace the child item rows for a memo, wholesale.
pub async fn replace_memo_items(
    pool: &SqlitePool,
    memo_id: &str,
    fields: &MemoFields,
) -> Result<(), ApiError> {
    match fields {
        MemoFields::Seizure(f) => {
            sqlx::query("DELETE FROM seized_items WHERE memo_id = ?")
                .bind(memo_id)
                .execute(pool)
                .await?;
            for (idx, item) in f.items.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO seized_items (memo_id, idx, description, quantity, estimated_value)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(memo_id)
                .bind(idx as i64)
                .bind(&item.description)
                .bind(item.quantity as i64)
                .bind(item.estimated_value)
                .execute(pool)
                .await?;
            }
        }
        MemoFields::PersonalSearch(f) => {
            sqlx::query("DELETE FROM personal_search_items WHERE memo_id = ?")
                .bind(memo_id)
                .execute(pool)
                .await?;
            for (idx, item) in f.items.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO personal_search_items (memo_id, idx, description, quantity)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(memo_id)
                .bind(idx as i64)
                .bind(&item.description)
                .bind(item.quantity as i64)
                .execute(pool)
                .await?;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn entry_from_row(row: &ActivityRow) -> Result<ActivityEntry, ApiError> {
    let action: ActivityAction =
        serde_json::from_str(&row.action_json).map_err(|e| ApiError::Internal(e.into()))?;
    Ok(ActivityEntry {
        entry_id: row.entry_id.clone(),
        case_id: row.case_id.clone(),
        actor: row.actor.clone(),
        action,
        detail: row.detail.clone(),
        timestamp: row.timestamp.clone(),
        previous_hash: row.previous_hash.clone(),
    })
}

/// Append an entry to the case's activity chain.
///
/// The last-hash read and the insert share a transaction so concurrent
/// saves on one case cannot both chain off the same predecessor.
pub async fn append_activity(
    pool: &SqlitePool,
    case_id: &str,
    actor: &str,
    action: ActivityAction,
    detail: Option<String>,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let last: Option<ActivityRow> = sqlx::query_as(
        r#"
        SELECT entry_id, case_id, actor, action_json, detail, timestamp, previous_hash
        FROM activity_logs
        WHERE case_id = ?
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(case_id)
    .fetch_optional(&mut *tx)
    .await?;

    let previous_hash = match &last {
        Some(row) => Some(entry_from_row(row)?.compute_hash()),
        None => None,
    };

    let entry = ActivityEntry::new(case_id, actor, action, detail, previous_hash);
    let action_json =
        serde_json::to_string(&entry.action).map_err(|e| ApiError::Internal(e.into()))?;

    sqlx::query(
        r#"
        INSERT INTO activity_logs (entry_id, case_id, actor, action_json, detail, timestamp, previous_hash)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.entry_id)
    .bind(&entry.case_id)
    .bind(&entry.actor)
    .bind(&action_json)
    .bind(&entry.detail)
    .bind(&entry.timestamp)
    .bind(&entry.previous_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
