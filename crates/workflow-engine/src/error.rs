use case_types::CaseStatus;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum WorkflowError {
    #[error("All accused must have all steps completed: {0}")]
    ChallanBlocked(String),

    #[error("At least one ground of arrest must be selected")]
    NoGroundsSelected,

    #[error("Mandatory ground not selected: {0}")]
    MandatoryGroundMissing(String),

    #[error("Unknown ground of arrest: {0}")]
    UnknownGround(String),

    #[error("A finalized document cannot be reverted to draft")]
    CompletionNotReversible,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: CaseStatus, to: CaseStatus },
}
