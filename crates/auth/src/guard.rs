//! Route guard: render vs. redirect vs. deny, per navigation.
//!
//! - No IO
//! - No panics
//! - Pure function of the session state and the route requirement

use serde::Serialize;

use crate::{RouteRequirement, SessionState};

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session check still in flight: show a placeholder, do not redirect.
    Loading,
    /// No session: go to the login route. The attempted destination is not kept.
    RedirectToLogin,
    /// Valid session, insufficient role: show the access-denied view.
    AccessDenied,
    /// Render the routed view.
    Render,
}

impl GuardDecision {
    pub fn is_render(self) -> bool {
        self == GuardDecision::Render
    }
}

/// Decide what to show for a route guarded by `requirement`.
pub fn evaluate(session: &SessionState, requirement: &RouteRequirement) -> GuardDecision {
    match session {
        SessionState::Unknown => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::RedirectToLogin,
        SessionState::Authenticated(_) => match requirement {
            RouteRequirement::Public => GuardDecision::Render,
            RouteRequirement::OneOf(roles) => {
                if session.has_any_role(roles) {
                    GuardDecision::Render
                } else {
                    GuardDecision::AccessDenied
                }
            }
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decision explanation (logging / access-denied view)
// ─────────────────────────────────────────────────────────────────────────────

/// Why the guard decided what it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardExplanation {
    pub decision: GuardDecision,
    pub session: &'static str,
    pub user_role: Option<String>,
    pub required_roles: Vec<String>,
    pub reason: String,
}

/// Evaluate and explain in one step.
pub fn explain(session: &SessionState, requirement: &RouteRequirement) -> GuardExplanation {
    let decision = evaluate(session, requirement);
    let user_role = session.current_user().map(|u| u.role.as_str().to_string());
    let required_roles: Vec<String> = requirement
        .roles()
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();

    let reason = match decision {
        GuardDecision::Loading => "session check in progress".to_string(),
        GuardDecision::RedirectToLogin => "no authenticated session".to_string(),
        GuardDecision::Render if requirement.is_public() => {
            "route is open to any authenticated user".to_string()
        }
        GuardDecision::Render => format!(
            "role '{}' is one of {:?}",
            user_role.as_deref().unwrap_or_default(),
            required_roles
        ),
        GuardDecision::AccessDenied if required_roles.is_empty() => {
            "route admits no roles".to_string()
        }
        GuardDecision::AccessDenied => format!(
            "role '{}' is not one of {:?}",
            user_role.as_deref().unwrap_or_default(),
            required_roles
        ),
    };

    if decision == GuardDecision::AccessDenied {
        tracing::debug!(
            user_role = user_role.as_deref().unwrap_or_default(),
            required = ?required_roles,
            "route access denied"
        );
    }

    GuardExplanation {
        decision,
        session: session.label(),
        user_role,
        required_roles,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, Role, User};

    fn logged_in(role: Role) -> SessionState {
        SessionState::Authenticated(User::new("tester", role))
    }

    fn admin_pages() -> RouteRequirement {
        RouteRequirement::any_of([Role::ADMIN, Role::SUPER_ADMIN])
    }

    #[test]
    fn admin_renders_admin_route() {
        assert_eq!(evaluate(&logged_in(Role::ADMIN), &admin_pages()), GuardDecision::Render);
    }

    #[test]
    fn accountant_is_denied_not_redirected() {
        assert_eq!(
            evaluate(&logged_in(Role::ACCOUNTANT), &admin_pages()),
            GuardDecision::AccessDenied
        );
    }

    #[test]
    fn anonymous_always_redirects() {
        let requirements = [
            RouteRequirement::Public,
            RouteRequirement::role(Role::ADMIN),
            admin_pages(),
            RouteRequirement::OneOf(vec![]),
        ];
        for req in requirements {
            assert_eq!(
                evaluate(&SessionState::Anonymous, &req),
                GuardDecision::RedirectToLogin
            );
        }
    }

    #[test]
    fn unknown_session_shows_loading() {
        for req in [RouteRequirement::Public, admin_pages()] {
            let decision = evaluate(&SessionState::Unknown, &req);
            assert_eq!(decision, GuardDecision::Loading);
            assert!(!decision.is_render());
        }
    }

    #[test]
    fn public_route_renders_for_any_role() {
        for role in Role::known() {
            assert!(evaluate(&logged_in(role), &RouteRequirement::Public).is_render());
        }
    }

    #[test]
    fn single_role_requirement_is_exact() {
        let req = RouteRequirement::role(Role::ADMIN);
        assert!(evaluate(&logged_in(Role::ADMIN), &req).is_render());
        assert_eq!(
            evaluate(&logged_in(Role::SUPER_ADMIN), &req),
            GuardDecision::AccessDenied
        );
    }

    #[test]
    fn empty_role_set_denies_authenticated_users() {
        let req = RouteRequirement::OneOf(vec![]);
        assert_eq!(
            evaluate(&logged_in(Role::SUPER_ADMIN), &req),
            GuardDecision::AccessDenied
        );
    }

    #[test]
    fn explanation_names_missing_roles() {
        let explanation = explain(
            &logged_in(Role::SOLUTIONS),
            &Capability::Finance.requirement(),
        );

        assert_eq!(explanation.decision, GuardDecision::AccessDenied);
        assert_eq!(explanation.user_role.as_deref(), Some("Solutions"));
        assert!(explanation.required_roles.contains(&"Accountant".to_string()));
        assert!(explanation.reason.contains("not one of"));
    }
}
