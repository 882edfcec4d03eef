//! Core domain types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Draft,
    InProgress,
    PendingApproval,
    Approved,
    ForwardedToCourt,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Draft => "draft",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::PendingApproval => "pending_approval",
            CaseStatus::Approved => "approved",
            CaseStatus::ForwardedToCourt => "forwarded_to_court",
            CaseStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(CaseStatus::Draft),
            "in_progress" => Some(CaseStatus::InProgress),
            "pending_approval" => Some(CaseStatus::PendingApproval),
            "approved" => Some(CaseStatus::Approved),
            "forwarded_to_court" => Some(CaseStatus::ForwardedToCourt),
            "closed" => Some(CaseStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the legally mandated memo types.
///
/// The first five are recorded per accused and together gate the challan.
/// Court forwarding is also per accused but is produced after approval, so
/// it does not count toward challan eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoKind {
    Seizure,
    Arrest,
    PersonalSearch,
    Medical,
    BnssChecklist,
    CourtForwarding,
}

impl MemoKind {
    /// The memo kinds every accused must complete before the challan.
    pub const REQUIRED_FOR_CHALLAN: [MemoKind; 5] = [
        MemoKind::Seizure,
        MemoKind::Arrest,
        MemoKind::PersonalSearch,
        MemoKind::Medical,
        MemoKind::BnssChecklist,
    ];

    pub const ALL: [MemoKind; 6] = [
        MemoKind::Seizure,
        MemoKind::Arrest,
        MemoKind::PersonalSearch,
        MemoKind::Medical,
        MemoKind::BnssChecklist,
        MemoKind::CourtForwarding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoKind::Seizure => "seizure",
            MemoKind::Arrest => "arrest",
            MemoKind::PersonalSearch => "personal_search",
            MemoKind::Medical => "medical",
            MemoKind::BnssChecklist => "bnss_checklist",
            MemoKind::CourtForwarding => "court_forwarding",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "seizure" => Some(MemoKind::Seizure),
            "arrest" => Some(MemoKind::Arrest),
            "personal_search" => Some(MemoKind::PersonalSearch),
            "medical" => Some(MemoKind::Medical),
            "bnss_checklist" => Some(MemoKind::BnssChecklist),
            "court_forwarding" => Some(MemoKind::CourtForwarding),
            _ => None,
        }
    }

    /// Document title as printed on the PDF header.
    pub fn title(&self) -> &'static str {
        match self {
            MemoKind::Seizure => "Seizure Memo",
            MemoKind::Arrest => "Arrest Memo",
            MemoKind::PersonalSearch => "Personal Search Memo",
            MemoKind::Medical => "Medical Examination Memo",
            MemoKind::BnssChecklist => "BNSS Compliance Checklist",
            MemoKind::CourtForwarding => "Court Forwarding Memo",
        }
    }

    /// Short label used in download filenames, e.g. `SeizureMemo`.
    pub fn file_label(&self) -> &'static str {
        match self {
            MemoKind::Seizure => "SeizureMemo",
            MemoKind::Arrest => "ArrestMemo",
            MemoKind::PersonalSearch => "PersonalSearchMemo",
            MemoKind::Medical => "MedicalMemo",
            MemoKind::BnssChecklist => "BNSSChecklist",
            MemoKind::CourtForwarding => "CourtForwardingMemo",
        }
    }
}

impl std::fmt::Display for MemoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case fields needed by the renderers and the workflow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub id: String,
    pub case_number: String,
    pub railway_post: String,
    pub law_section: String,
    pub fir_number: Option<String>,
    pub incident_description: String,
    pub status: CaseStatus,
    pub registered_at: DateTime<Utc>,
}

/// Accused fields needed by the renderers and the workflow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccusedSnapshot {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub parentage: String,
    pub address: String,
    pub age: u32,
    pub gender: String,
}
