//! PDF download handlers.

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
};
use case_types::MemoFields;
use std::sync::Arc;

use memo_pdf::{
    download_filename, render_arrest, render_bnss_checklist, render_challan,
    render_court_forwarding, render_medical, render_personal_search, render_seizure,
};

use crate::error::ApiError;
use crate::queries;
use crate::state::AppState;

type PdfReply = (StatusCode, [(HeaderName, String); 2], Vec<u8>);

fn pdf_reply(filename: String, bytes: Vec<u8>) -> PdfReply {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
}

pub async fn memo_pdf(
    State(state): State<Arc<AppState>>,
    Path((case_id, accused_id, kind)): Path<(String, String, String)>,
) -> Result<PdfReply, ApiError> {
    let kind = case_types::MemoKind::parse(&kind)
        .ok_or_else(|| ApiError::InvalidRequest(format!("Unknown memo kind: {}", kind)))?;

    let case = queries::fetch_case(&state.db, &case_id).await?;
    let accused = queries::fetch_accused(&state.db, &case_id, &accused_id).await?;
    let row = queries::fetch_memo(&state.db, kind, &case_id, &accused_id)
        .await?
        .ok_or_else(|| ApiError::MemoNotFound(format!("{} for accused {}", kind, accused_id)))?;

    let case_snap = case.snapshot();
    let accused_snap = accused.snapshot();
    let signature = row.signature_png.as_deref();
    let fields = queries::load_memo_fields(&state.db, &row).await?;

    let bytes = match &fields {
        MemoFields::Seizure(f) => render_seizure(&case_snap, &accused_snap, f, signature)?,
        MemoFields::Arrest(f) => render_arrest(&case_snap, &accused_snap, f, signature)?,
        MemoFields::PersonalSearch(f) => {
            render_personal_search(&case_snap, &accused_snap, f, signature)?
        }
        MemoFields::Medical(f) => render_medical(&case_snap, &accused_snap, f, signature)?,
        MemoFields::BnssChecklist(f) => {
            render_bnss_checklist(&case_snap, &accused_snap, f, signature)?
        }
        MemoFields::CourtForwarding(f) => {
            render_court_forwarding(&case_snap, &accused_snap, f, signature)?
        }
    };

    let filename = download_filename(kind.file_label(), &case_snap.case_number);
    Ok(pdf_reply(filename, bytes))
}

pub async fn challan_pdf(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<PdfReply, ApiError> {
    let case = queries::fetch_case(&state.db, &case_id).await?;
    let row = queries::fetch_challan(&state.db, &case_id)
        .await?
        .ok_or_else(|| ApiError::ChallanNotFound(case_id.clone()))?;

    let fields: case_types::ChallanFields =
        serde_json::from_str(&row.fields_json).map_err(|e| ApiError::Internal(e.into()))?;

    let accused = queries::list_accused(&state.db, &case_id).await?;
    let docs = queries::accused_documents(&state.db, &case_id).await?;
    let rows: Vec<_> = accused
        .iter()
        .filter_map(|a| {
            docs.iter()
                .find(|d| d.accused_id == a.id)
                .map(|d| (a.snapshot(), d.clone()))
        })
        .collect();

    let case_snap = case.snapshot();
    let bytes = render_challan(&case_snap, &fields, &rows, row.signature_png.as_deref())?;

    let filename = download_filename("Challan", &case_snap.case_number);
    Ok(pdf_reply(filename, bytes))
}
