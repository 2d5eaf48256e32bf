//! Project lifecycle stages and the linear advancement rule.
//!
//! Projects move forward one stage at a time. The stage picker in the UI only
//! ever offers the immediate successor of the current stage.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Lifecycle stage of a tracked project, in advancement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectStage {
    Enquiry,
    SiteSurvey,
    Quotation,
    PurchaseOrder,
    Implementation,
    Commissioning,
    Invoiced,
    Closed,
}

impl ProjectStage {
    /// All stages in advancement order.
    pub const ALL: [ProjectStage; 8] = [
        ProjectStage::Enquiry,
        ProjectStage::SiteSurvey,
        ProjectStage::Quotation,
        ProjectStage::PurchaseOrder,
        ProjectStage::Implementation,
        ProjectStage::Commissioning,
        ProjectStage::Invoiced,
        ProjectStage::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStage::Enquiry => "Enquiry",
            ProjectStage::SiteSurvey => "Site Survey",
            ProjectStage::Quotation => "Quotation",
            ProjectStage::PurchaseOrder => "Purchase Order",
            ProjectStage::Implementation => "Implementation",
            ProjectStage::Commissioning => "Commissioning",
            ProjectStage::Invoiced => "Invoiced",
            ProjectStage::Closed => "Closed",
        }
    }

    /// Zero-based position in the lifecycle.
    pub fn position(self) -> usize {
        // ALL is ordered like the enum discriminants.
        self as usize
    }

    /// The immediate successor, or `None` for `Closed`.
    pub fn next(self) -> Option<ProjectStage> {
        Self::ALL.get(self.position() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Stages the picker offers when the project is at `self`.
    pub fn advance_options(self) -> Vec<ProjectStage> {
        self.next().into_iter().collect()
    }

    /// Validate a requested transition `self -> target`.
    pub fn advance_to(self, target: ProjectStage) -> DomainResult<ProjectStage> {
        match self.next() {
            Some(next) if next == target => Ok(next),
            Some(_) => Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: target.to_string(),
            }),
            None => Err(DomainError::invariant(format!(
                "project is already {}",
                self.as_str()
            ))),
        }
    }
}

impl core::fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn enquiry_offers_only_site_survey() {
        assert_eq!(
            ProjectStage::Enquiry.advance_options(),
            vec![ProjectStage::SiteSurvey]
        );
    }

    #[test]
    fn closed_offers_nothing() {
        assert!(ProjectStage::Closed.advance_options().is_empty());
        assert!(ProjectStage::Closed.is_terminal());
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let err = ProjectStage::Quotation
            .advance_to(ProjectStage::Implementation)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "Quotation".to_string(),
                to: "Implementation".to_string(),
            }
        );
    }

    #[test]
    fn advancing_a_closed_project_is_an_invariant_violation() {
        let err = ProjectStage::Closed
            .advance_to(ProjectStage::Closed)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&ProjectStage::PurchaseOrder).unwrap();
        assert_eq!(json, "\"PurchaseOrder\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a transition succeeds iff the target is exactly one
        /// position ahead of the current stage.
        #[test]
        fn advancement_is_strictly_linear(from in 0usize..8, to in 0usize..8) {
            let from = ProjectStage::ALL[from];
            let to = ProjectStage::ALL[to];

            let result = from.advance_to(to);
            prop_assert_eq!(result.is_ok(), to.position() == from.position() + 1);
        }
    }
}
