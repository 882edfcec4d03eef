//! Hash-linked activity log for case events.
//!
//! Each case accumulates an append-only chain of entries; every entry
//! carries the hash of its predecessor so after-the-fact edits to the
//! `activity_logs` table are detectable.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::MemoKind;

/// Actions recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "action")]
pub enum ActivityAction {
    CaseRegistered,
    AccusedAdded { accused_id: String },
    MemoSaved { kind: MemoKind, accused_id: String },
    MemoFinalized { kind: MemoKind, accused_id: String },
    ChallanSaved,
    ChallanFinalized,
    CaseClosed,
}

/// A single activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub entry_id: String,
    pub case_id: String,
    pub actor: String,
    pub action: ActivityAction,
    pub detail: Option<String>,
    pub timestamp: String,
    pub previous_hash: Option<String>,
}

impl ActivityEntry {
    pub fn new(
        case_id: &str,
        actor: &str,
        action: ActivityAction,
        detail: Option<String>,
        previous_hash: Option<String>,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4().to_string(),
            case_id: case_id.to_string(),
            actor: actor.to_string(),
            action,
            detail,
            timestamp: Utc::now().to_rfc3339(),
            previous_hash,
        }
    }

    /// Hash of this entry, used as the next entry's `previous_hash`.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.entry_id.as_bytes());
        hasher.update(self.case_id.as_bytes());
        hasher.update(self.actor.as_bytes());
        hasher.update(format!("{:?}", self.action).as_bytes());
        hasher.update(self.timestamp.as_bytes());
        if let Some(ref prev) = self.previous_hash {
            hasher.update(prev.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Verify linkage of a case's entries in insertion order.
pub fn verify_chain(entries: &[ActivityEntry]) -> Result<(), String> {
    let mut expected_prev: Option<String> = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.previous_hash != expected_prev {
            return Err(format!(
                "Activity chain broken at entry {}: expected prev {:?}, got {:?}",
                i, expected_prev, entry.previous_hash
            ));
        }
        expected_prev = Some(entry.compute_hash());
    }
    Ok(())
}
