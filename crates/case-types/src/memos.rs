//! Typed form fields for each memo kind.
//!
//! Every memo row stores its kind-specific fields as a JSON column; these
//! structs are that column's schema. Itemized lists (seized items, personal
//! search items) additionally project into their own child tables so they
//! stay queryable row by row.

use serde::{Deserialize, Serialize};

use crate::types::MemoKind;

/// One seized article, enumerated on the seizure memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeizedItem {
    pub description: String,
    pub quantity: u32,
    pub estimated_value: f64,
}

/// One article found during personal search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalSearchItem {
    pub description: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeizureFields {
    pub place_of_seizure: String,
    pub seized_from: String,
    pub witnesses: Vec<String>,
    #[serde(default)]
    pub items: Vec<SeizedItem>,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrestFields {
    pub place_of_arrest: String,
    pub arrest_datetime: String,
    pub arresting_officer: String,
    pub grounds_summary: String,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalSearchFields {
    pub place_of_search: String,
    pub conducted_by: String,
    pub witnesses: Vec<String>,
    #[serde(default)]
    pub items: Vec<PersonalSearchItem>,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalFields {
    pub hospital: String,
    pub examined_by: String,
    pub examined_at: String,
    #[serde(default)]
    pub injuries_noted: String,
    pub fit_for_custody: bool,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BnssChecklistFields {
    /// Identifiers from the fixed grounds-of-arrest catalog.
    pub grounds_checked: Vec<String>,
    pub person_informed: String,
    pub relation_to_accused: String,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtForwardingFields {
    pub court_name: String,
    pub forwarding_datetime: String,
    pub escorting_officer: String,
    pub documents_enclosed: Vec<String>,
    #[serde(default)]
    pub remarks: String,
}

/// Case-level challan fields (not a `MemoFields` variant: the challan is
/// keyed by case only and has its own table and endpoints).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallanFields {
    pub court_name: String,
    pub investigating_officer: String,
    pub brief_facts: String,
    pub witnesses: Vec<String>,
}

/// Tagged union over the per-accused memo forms, as submitted by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoFields {
    Seizure(SeizureFields),
    Arrest(ArrestFields),
    PersonalSearch(PersonalSearchFields),
    Medical(MedicalFields),
    BnssChecklist(BnssChecklistFields),
    CourtForwarding(CourtForwardingFields),
}

impl MemoFields {
    pub fn kind(&self) -> MemoKind {
        match self {
            MemoFields::Seizure(_) => MemoKind::Seizure,
            MemoFields::Arrest(_) => MemoKind::Arrest,
            MemoFields::PersonalSearch(_) => MemoKind::PersonalSearch,
            MemoFields::Medical(_) => MemoKind::Medical,
            MemoFields::BnssChecklist(_) => MemoKind::BnssChecklist,
            MemoFields::CourtForwarding(_) => MemoKind::CourtForwarding,
        }
    }
}
