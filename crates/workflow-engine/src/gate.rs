//! Challan eligibility gate.

use serde::{Deserialize, Serialize};

use crate::completion::AccusedDocuments;
use crate::error::WorkflowError;

/// Outcome of the gate, with enough detail to tell the user what is left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateDecision {
    pub eligible: bool,
    /// One line per blocking accused: name plus pending memo titles.
    pub blockers: Vec<String>,
}

/// Compute challan eligibility for a case: the logical AND of the
/// per-accused aggregator across all accused. A case with no accused is
/// not eligible.
pub fn challan_eligibility(accused: &[AccusedDocuments]) -> GateDecision {
    if accused.is_empty() {
        return GateDecision {
            eligible: false,
            blockers: vec!["case has no accused on record".to_string()],
        };
    }

    let blockers: Vec<String> = accused
        .iter()
        .filter(|docs| !docs.all_complete())
        .map(|docs| {
            let pending: Vec<&str> = docs.pending().iter().map(|k| k.title()).collect();
            format!("{}: {}", docs.accused_name, pending.join(", "))
        })
        .collect();

    GateDecision {
        eligible: blockers.is_empty(),
        blockers,
    }
}

/// Enforce the gate for a finalize-challan action. Draft saves must not
/// call this.
pub fn check_challan_finalize(accused: &[AccusedDocuments]) -> Result<(), WorkflowError> {
    let decision = challan_eligibility(accused);
    if decision.eligible {
        Ok(())
    } else {
        Err(WorkflowError::ChallanBlocked(decision.blockers.join("; ")))
    }
}
