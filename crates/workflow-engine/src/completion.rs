//! Per-accused completion aggregator.

use case_types::MemoKind;
use serde::{Deserialize, Serialize};

/// State of one memo record for one accused.
///
/// A missing record counts as incomplete; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocState {
    Missing,
    Draft,
    Complete,
}

impl DocState {
    pub fn from_flag(is_completed: Option<bool>) -> Self {
        match is_completed {
            None => DocState::Missing,
            Some(false) => DocState::Draft,
            Some(true) => DocState::Complete,
        }
    }
}

/// The five challan-gating memo states for one accused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccusedDocuments {
    pub accused_id: String,
    pub accused_name: String,
    states: [DocState; 5],
}

impl AccusedDocuments {
    /// Start with no records (everything missing).
    pub fn new(accused_id: &str, accused_name: &str) -> Self {
        Self {
            accused_id: accused_id.to_string(),
            accused_name: accused_name.to_string(),
            states: [DocState::Missing; 5],
        }
    }

    fn slot(kind: MemoKind) -> Option<usize> {
        MemoKind::REQUIRED_FOR_CHALLAN.iter().position(|k| *k == kind)
    }

    /// Record the completion flag of one memo. Kinds outside the required
    /// five (court forwarding) are ignored.
    pub fn set(&mut self, kind: MemoKind, is_completed: Option<bool>) {
        if let Some(i) = Self::slot(kind) {
            self.states[i] = DocState::from_flag(is_completed);
        }
    }

    pub fn state(&self, kind: MemoKind) -> DocState {
        Self::slot(kind).map_or(DocState::Missing, |i| self.states[i])
    }

    /// The aggregator: true iff all five records exist and are complete.
    pub fn all_complete(&self) -> bool {
        self.states.iter().all(|s| *s == DocState::Complete)
    }

    /// Kinds still missing or in draft, in canonical order.
    pub fn pending(&self) -> Vec<MemoKind> {
        MemoKind::REQUIRED_FOR_CHALLAN
            .iter()
            .zip(self.states.iter())
            .filter(|(_, s)| **s != DocState::Complete)
            .map(|(k, _)| *k)
            .collect()
    }
}
