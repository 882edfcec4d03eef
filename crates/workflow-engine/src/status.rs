//! Case status transitions.
//!
//! Statuses only move forward. Events that would keep the case where it
//! already is (or behind) are no-ops, so repeated memo saves never error.

use case_types::CaseStatus;

use crate::error::WorkflowError;

/// Workflow events that drive the case status forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseEvent {
    /// Any memo draft or finalize on the case.
    MemoSaved,
    /// Challan saved as draft.
    ChallanDrafted,
    /// Challan finalized with the gate passing.
    ChallanFinalized,
    /// Court forwarding memo finalized for every accused.
    ForwardedToCourt,
    /// Explicit close action.
    Closed,
}

impl CaseEvent {
    fn target(&self) -> CaseStatus {
        match self {
            CaseEvent::MemoSaved => CaseStatus::InProgress,
            CaseEvent::ChallanDrafted => CaseStatus::PendingApproval,
            CaseEvent::ChallanFinalized => CaseStatus::Approved,
            CaseEvent::ForwardedToCourt => CaseStatus::ForwardedToCourt,
            CaseEvent::Closed => CaseStatus::Closed,
        }
    }
}

/// Apply an event to the current status.
///
/// Returns the (possibly unchanged) new status. Closing is only valid from
/// `forwarded_to_court`; every other event either advances the case to its
/// target or leaves a later status alone.
pub fn advance_status(current: CaseStatus, event: CaseEvent) -> Result<CaseStatus, WorkflowError> {
    let target = event.target();

    if current == CaseStatus::Closed && target != CaseStatus::Closed {
        return Err(WorkflowError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    match event {
        CaseEvent::Closed => {
            if current == CaseStatus::ForwardedToCourt {
                Ok(CaseStatus::Closed)
            } else {
                Err(WorkflowError::InvalidTransition {
                    from: current,
                    to: CaseStatus::Closed,
                })
            }
        }
        CaseEvent::ChallanFinalized => {
            // Requires the challan draft step to have happened.
            if current == CaseStatus::PendingApproval {
                Ok(CaseStatus::Approved)
            } else if current >= CaseStatus::Approved {
                Ok(current)
            } else {
                Err(WorkflowError::InvalidTransition {
                    from: current,
                    to: CaseStatus::Approved,
                })
            }
        }
        CaseEvent::ForwardedToCourt => {
            if current == CaseStatus::Approved {
                Ok(CaseStatus::ForwardedToCourt)
            } else if current >= CaseStatus::ForwardedToCourt {
                Ok(current)
            } else {
                Err(WorkflowError::InvalidTransition {
                    from: current,
                    to: CaseStatus::ForwardedToCourt,
                })
            }
        }
        // MemoSaved and ChallanDrafted only ever pull the case forward.
        _ => Ok(current.max(target)),
    }
}
