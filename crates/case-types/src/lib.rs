pub mod activity;
pub mod memos;
pub mod signature;
pub mod types;

pub use activity::{ActivityAction, ActivityEntry};
pub use memos::{
    ArrestFields, BnssChecklistFields, ChallanFields, CourtForwardingFields, MedicalFields,
    MemoFields, PersonalSearchFields, PersonalSearchItem, SeizedItem, SeizureFields,
};
pub use types::{AccusedSnapshot, CaseSnapshot, CaseStatus, MemoKind};
