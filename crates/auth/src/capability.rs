//! Named role sets.
//!
//! Privilege expansion (e.g. `SuperAdmin` may do whatever `Admin` may do) is
//! encoded here once, instead of as role lists repeated at each call site.

use serde::{Deserialize, Serialize};

use crate::{Role, RouteRequirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// User management and system settings.
    Administration,
    /// Ledger, invoices and payment tracking.
    Finance,
    /// Enquiries, quotations and customer records.
    Sales,
    /// Site surveys, implementation and commissioning work.
    Engineering,
    /// Moving a project to its next lifecycle stage.
    StageAdvancement,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Administration,
        Capability::Finance,
        Capability::Sales,
        Capability::Engineering,
        Capability::StageAdvancement,
    ];

    /// Roles granted this capability.
    pub fn roles(self) -> Vec<Role> {
        match self {
            Capability::Administration => vec![Role::ADMIN, Role::SUPER_ADMIN],
            Capability::Finance => vec![Role::ACCOUNTANT, Role::ADMIN, Role::SUPER_ADMIN],
            Capability::Sales => vec![
                Role::SALES_EXECUTIVE,
                Role::SOLUTIONS,
                Role::ADMIN,
                Role::SUPER_ADMIN,
            ],
            Capability::Engineering => vec![
                Role::WIRELESS_ENGINEER,
                Role::IP_BROADBAND_ENGINEER,
                Role::SOLUTIONS,
                Role::ADMIN,
                Role::SUPER_ADMIN,
            ],
            Capability::StageAdvancement => vec![
                Role::SALES_EXECUTIVE,
                Role::SOLUTIONS,
                Role::WIRELESS_ENGINEER,
                Role::IP_BROADBAND_ENGINEER,
                Role::ADMIN,
                Role::SUPER_ADMIN,
            ],
        }
    }

    pub fn grants(self, role: &Role) -> bool {
        self.roles().iter().any(|r| r == role)
    }

    /// Route requirement admitting exactly the roles of this capability.
    pub fn requirement(self) -> RouteRequirement {
        RouteRequirement::OneOf(self.roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_is_expanded_explicitly() {
        for capability in Capability::ALL {
            assert!(
                capability.grants(&Role::SUPER_ADMIN),
                "{capability:?} should grant SuperAdmin"
            );
        }
    }

    #[test]
    fn accountant_is_limited_to_finance() {
        let granted: Vec<Capability> = Capability::ALL
            .into_iter()
            .filter(|c| c.grants(&Role::ACCOUNTANT))
            .collect();
        assert_eq!(granted, vec![Capability::Finance]);
    }

    #[test]
    fn every_capability_has_members() {
        for capability in Capability::ALL {
            assert!(!capability.roles().is_empty());
        }
    }
}
