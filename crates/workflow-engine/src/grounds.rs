//! BNSS grounds-of-arrest checklist validation.
//!
//! The grounds are a fixed statutory catalog; the checklist form submits
//! the identifiers of the boxes the officer ticked. Finalizing the
//! checklist runs the validator; draft saves bypass it.

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// One ground of arrest from the BNSS checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ground {
    pub id: &'static str,
    pub label: &'static str,
    pub mandatory: bool,
}

/// The fixed grounds catalog, as printed on the checklist form.
const GROUNDS: [Ground; 10] = [
    Ground {
        id: "offence_committed",
        label: "Accused has committed a cognizable offence",
        mandatory: true,
    },
    Ground {
        id: "grounds_communicated",
        label: "Grounds of arrest communicated to the accused",
        mandatory: true,
    },
    Ground {
        id: "relative_informed",
        label: "Relative or nominated person informed of the arrest",
        mandatory: true,
    },
    Ground {
        id: "memo_attested",
        label: "Arrest memo attested by a witness",
        mandatory: true,
    },
    Ground {
        id: "prevent_further_offence",
        label: "Arrest necessary to prevent further offence",
        mandatory: false,
    },
    Ground {
        id: "proper_investigation",
        label: "Arrest necessary for proper investigation",
        mandatory: false,
    },
    Ground {
        id: "prevent_evidence_tampering",
        label: "Arrest necessary to prevent tampering with evidence",
        mandatory: false,
    },
    Ground {
        id: "prevent_inducement",
        label: "Arrest necessary to prevent inducement of witnesses",
        mandatory: false,
    },
    Ground {
        id: "court_attendance",
        label: "Arrest necessary to ensure presence before court",
        mandatory: false,
    },
    Ground {
        id: "medical_examination_offered",
        label: "Medical examination of the accused offered",
        mandatory: false,
    },
];

/// Which variant of the checklist rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundsPolicy {
    /// At least one ground checked.
    AnyGround,
    /// Every mandatory ground checked.
    AllMandatory,
}

pub fn grounds_catalog() -> &'static [Ground] {
    &GROUNDS
}

/// Validate the checked grounds against the catalog and the policy.
pub fn validate_grounds(checked: &[String], policy: GroundsPolicy) -> Result<(), WorkflowError> {
    for id in checked {
        if !GROUNDS.iter().any(|g| g.id == id) {
            return Err(WorkflowError::UnknownGround(id.clone()));
        }
    }

    if checked.is_empty() {
        return Err(WorkflowError::NoGroundsSelected);
    }

    if policy == GroundsPolicy::AllMandatory {
        for ground in GROUNDS.iter().filter(|g| g.mandatory) {
            if !checked.iter().any(|id| id == ground.id) {
                return Err(WorkflowError::MandatoryGroundMissing(
                    ground.label.to_string(),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(mandatory_only: bool) -> Vec<String> {
        GROUNDS
            .iter()
            .filter(|g| !mandatory_only || g.mandatory)
            .map(|g| g.id.to_string())
            .collect()
    }

    #[test]
    fn catalog_has_four_mandatory_grounds() {
        assert_eq!(GROUNDS.iter().filter(|g| g.mandatory).count(), 4);
        assert_eq!(GROUNDS.len(), 10);
    }

    #[test]
    fn zero_grounds_rejected_under_both_policies() {
        assert_eq!(
            validate_grounds(&[], GroundsPolicy::AnyGround),
            Err(WorkflowError::NoGroundsSelected)
        );
        assert_eq!(
            validate_grounds(&[], GroundsPolicy::AllMandatory),
            Err(WorkflowError::NoGroundsSelected)
        );
    }

    #[test]
    fn one_ground_satisfies_any_ground() {
        let checked = vec!["proper_investigation".to_string()];
        assert!(validate_grounds(&checked, GroundsPolicy::AnyGround).is_ok());
    }

    #[test]
    fn one_optional_ground_fails_all_mandatory() {
        let checked = vec!["proper_investigation".to_string()];
        let err = validate_grounds(&checked, GroundsPolicy::AllMandatory).unwrap_err();
        assert!(matches!(err, WorkflowError::MandatoryGroundMissing(_)));
    }

    #[test]
    fn all_mandatory_grounds_pass_strict_policy() {
        assert!(validate_grounds(&ids(true), GroundsPolicy::AllMandatory).is_ok());
        assert!(validate_grounds(&ids(false), GroundsPolicy::AllMandatory).is_ok());
    }

    #[test]
    fn unknown_ground_rejected() {
        let checked = vec!["made_up_ground".to_string()];
        assert_eq!(
            validate_grounds(&checked, GroundsPolicy::AnyGround),
            Err(WorkflowError::UnknownGround("made_up_ground".to_string()))
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn subset_of_catalog() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(prop::bool::ANY, GROUNDS.len()).prop_map(|mask| {
                GROUNDS
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| *keep)
                    .map(|(g, _)| g.id.to_string())
                    .collect()
            })
        }

        proptest! {
            /// AnyGround accepts exactly the non-empty subsets.
            #[test]
            fn any_ground_accepts_nonempty_subsets(checked in subset_of_catalog()) {
                let result = validate_grounds(&checked, GroundsPolicy::AnyGround);
                prop_assert_eq!(result.is_ok(), !checked.is_empty());
            }

            /// AllMandatory accepts exactly the subsets covering every
            /// mandatory ground.
            #[test]
            fn all_mandatory_requires_mandatory_cover(checked in subset_of_catalog()) {
                let covers = GROUNDS
                    .iter()
                    .filter(|g| g.mandatory)
                    .all(|g| checked.iter().any(|id| id == g.id));
                let result = validate_grounds(&checked, GroundsPolicy::AllMandatory);
                prop_assert_eq!(result.is_ok(), covers && !checked.is_empty());
            }
        }
    }
}
