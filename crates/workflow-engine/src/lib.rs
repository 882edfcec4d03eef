//! Document-completion workflow rules.
//!
//! Pure predicates over already-fetched records: the per-accused completion
//! aggregator, the challan-eligibility gate, the BNSS grounds-of-arrest
//! validator, and the case status transition table. Nothing here touches
//! the database; callers pass the flags in and get a decision back.

pub mod completion;
pub mod error;
pub mod gate;
pub mod grounds;
pub mod status;

pub use completion::{AccusedDocuments, DocState};
pub use error::WorkflowError;
pub use gate::{challan_eligibility, check_challan_finalize, GateDecision};
pub use grounds::{grounds_catalog, validate_grounds, Ground, GroundsPolicy};
pub use status::{advance_status, CaseEvent};
