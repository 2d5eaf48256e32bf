//! Route requirements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// What a route (or menu entry) demands of the current user.
///
/// A single required role is `OneOf` with one member, so exactly one code path
/// applies per route. An empty `OneOf` admits nobody.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Reachable by any authenticated user.
    #[default]
    Public,
    /// Reachable iff the user's role is one of these.
    OneOf(Vec<Role>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("route '{0}' sets both `role` and `roles`; use one")]
    ConflictingRequirement(String),

    #[error("route '{0}' has an empty `roles` list")]
    EmptyRoleSet(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("invalid route path '{0}': must start with '/'")]
    InvalidPath(String),
}

impl RouteRequirement {
    /// Requirement for exactly one role.
    pub fn role(role: Role) -> Self {
        Self::OneOf(vec![role])
    }

    /// Requirement for any of `roles`; duplicates are dropped, order kept.
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut out: Vec<Role> = Vec::new();
        for role in roles {
            if !out.contains(&role) {
                out.push(role);
            }
        }
        Self::OneOf(out)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Roles required, empty for `Public`.
    pub fn roles(&self) -> &[Role] {
        match self {
            Self::Public => &[],
            Self::OneOf(roles) => roles,
        }
    }
}

/// Requirement as it appears in route configuration data.
///
/// `role` and `roles` are mutually exclusive; neither means public.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequirementConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl RequirementConfig {
    /// Resolve into a tagged requirement. `path` is only used for error context.
    pub fn resolve(self, path: &str) -> Result<RouteRequirement, RouteConfigError> {
        match (self.role, self.roles) {
            (Some(_), Some(_)) => Err(RouteConfigError::ConflictingRequirement(path.to_string())),
            (Some(role), None) => Ok(RouteRequirement::role(role)),
            (None, Some(roles)) if roles.is_empty() => {
                Err(RouteConfigError::EmptyRoleSet(path.to_string()))
            }
            (None, Some(roles)) => Ok(RouteRequirement::any_of(roles)),
            (None, None) => Ok(RouteRequirement::Public),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_with_both_shapes_is_rejected() {
        let cfg = RequirementConfig {
            role: Some(Role::ADMIN),
            roles: Some(vec![Role::ACCOUNTANT]),
        };
        assert_eq!(
            cfg.resolve("/finance"),
            Err(RouteConfigError::ConflictingRequirement("/finance".to_string()))
        );
    }

    #[test]
    fn config_with_empty_roles_is_rejected() {
        let cfg = RequirementConfig {
            role: None,
            roles: Some(vec![]),
        };
        assert!(matches!(
            cfg.resolve("/x"),
            Err(RouteConfigError::EmptyRoleSet(_))
        ));
    }

    #[test]
    fn config_single_role_becomes_one_member_set() {
        let cfg: RequirementConfig = serde_json::from_str(r#"{"role":"Accountant"}"#).unwrap();
        assert_eq!(
            cfg.resolve("/ledger").unwrap(),
            RouteRequirement::OneOf(vec![Role::ACCOUNTANT])
        );
    }

    #[test]
    fn config_without_requirement_is_public() {
        let cfg: RequirementConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.resolve("/").unwrap().is_public());
    }

    #[test]
    fn any_of_drops_duplicates_in_order() {
        let req = RouteRequirement::any_of([Role::ADMIN, Role::SUPER_ADMIN, Role::ADMIN]);
        assert_eq!(req.roles(), &[Role::ADMIN, Role::SUPER_ADMIN]);
    }
}
