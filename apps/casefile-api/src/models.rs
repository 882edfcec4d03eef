//! Data models for Casefile API

use case_types::{CaseStatus, ChallanFields, MemoFields, MemoKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workflow_engine::DocState;

fn default_actor() -> String {
    "system".to_string()
}

// ---------------------------------------------------------------------------
// Database rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct CaseRow {
    pub id: String,
    pub case_number: String,
    pub railway_post: String,
    pub law_section: String,
    pub fir_number: Option<String>,
    pub incident_description: String,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseRow {
    pub fn status(&self) -> CaseStatus {
        CaseStatus::parse(&self.status).unwrap_or(CaseStatus::Draft)
    }

    pub fn snapshot(&self) -> case_types::CaseSnapshot {
        case_types::CaseSnapshot {
            id: self.id.clone(),
            case_number: self.case_number.clone(),
            railway_post: self.railway_post.clone(),
            law_section: self.law_section.clone(),
            fir_number: self.fir_number.clone(),
            incident_description: self.incident_description.clone(),
            status: self.status(),
            registered_at: self.registered_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AccusedRow {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub parentage: String,
    pub address: String,
    pub age: i64,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

impl AccusedRow {
    pub fn snapshot(&self) -> case_types::AccusedSnapshot {
        case_types::AccusedSnapshot {
            id: self.id.clone(),
            case_id: self.case_id.clone(),
            name: self.name.clone(),
            parentage: self.parentage.clone(),
            address: self.address.clone(),
            age: self.age.max(0) as u32,
            gender: self.gender.clone(),
        }
    }
}

/// Row shape shared by the six memo tables.
#[derive(Debug, Clone, FromRow)]
pub struct MemoRow {
    pub id: String,
    pub case_id: String,
    pub accused_id: String,
    pub fields_json: String,
    pub signature_png: Option<Vec<u8>>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChallanRow {
    pub id: String,
    pub case_id: String,
    pub fields_json: String,
    pub signature_png: Option<Vec<u8>>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub entry_id: String,
    pub case_id: String,
    pub actor: String,
    pub action_json: String,
    pub detail: Option<String>,
    pub timestamp: String,
    pub previous_hash: Option<String>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCaseRequest {
    pub case_number: String,
    pub railway_post: String,
    pub law_section: String,
    #[serde(default)]
    pub fir_number: Option<String>,
    pub incident_description: String,
    #[serde(default = "default_actor")]
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAccusedRequest {
    pub name: String,
    pub parentage: String,
    pub address: String,
    pub age: u32,
    pub gender: String,
    #[serde(default = "default_actor")]
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertMemoRequest {
    pub complete: bool,
    pub fields: MemoFields,
    /// Base64-encoded PNG captured from the signature pad.
    #[serde(default)]
    pub signature_png: Option<String>,
    #[serde(default = "default_actor")]
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertChallanRequest {
    pub complete: bool,
    pub fields: ChallanFields,
    #[serde(default)]
    pub signature_png: Option<String>,
    #[serde(default = "default_actor")]
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseCaseRequest {
    #[serde(default = "default_actor")]
    pub actor: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CaseResponse {
    pub id: String,
    pub case_number: String,
    pub railway_post: String,
    pub law_section: String,
    pub fir_number: Option<String>,
    pub incident_description: String,
    pub status: CaseStatus,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CaseRow> for CaseResponse {
    fn from(row: &CaseRow) -> Self {
        Self {
            id: row.id.clone(),
            case_number: row.case_number.clone(),
            railway_post: row.railway_post.clone(),
            law_section: row.law_section.clone(),
            fir_number: row.fir_number.clone(),
            incident_description: row.incident_description.clone(),
            status: row.status(),
            registered_at: row.registered_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseDetailResponse {
    #[serde(flatten)]
    pub case: CaseResponse,
    pub accused: Vec<AccusedResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccusedResponse {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub parentage: String,
    pub address: String,
    pub age: i64,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccusedRow> for AccusedResponse {
    fn from(row: &AccusedRow) -> Self {
        Self {
            id: row.id.clone(),
            case_id: row.case_id.clone(),
            name: row.name.clone(),
            parentage: row.parentage.clone(),
            address: row.address.clone(),
            age: row.age,
            gender: row.gender.clone(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoResponse {
    pub kind: MemoKind,
    pub case_id: String,
    pub accused_id: String,
    pub is_completed: bool,
    pub fields: MemoFields,
    pub has_signature: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChallanResponse {
    pub case_id: String,
    pub is_completed: bool,
    pub fields: ChallanFields,
    pub has_signature: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocStatus {
    pub kind: MemoKind,
    pub state: DocState,
}

/// Aggregator result for one accused, with the per-kind breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponse {
    pub accused_id: String,
    pub accused_name: String,
    pub complete: bool,
    pub documents: Vec<DocStatus>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub post: String,
    pub zone: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RailwayPostResponse {
    pub id: String,
    pub name: String,
    pub division: String,
    pub zone: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LawSectionResponse {
    pub id: String,
    pub act: String,
    pub section: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub entries: Vec<case_types::ActivityEntry>,
    /// False when the stored rows no longer form a valid hash chain.
    pub chain_intact: bool,
}
