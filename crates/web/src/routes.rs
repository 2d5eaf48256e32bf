//! The application route table.

use protrack_auth::{Capability, Route, RouteConfigError, RouteRequirement, RouteTable};

use crate::pages::Page;

pub const LOGIN_PATH: &str = "/login";

/// Build the route table. `/projects/new` precedes `/projects/:id` so the
/// literal wins.
pub fn route_table(login_path: &str) -> Result<RouteTable<Page>, RouteConfigError> {
    RouteTable::new(
        login_path,
        vec![
            Route::open(login_path, Page::Login),
            Route::new("/", Page::Dashboard, RouteRequirement::Public),
            Route::new("/projects", Page::Projects, RouteRequirement::Public),
            Route::new("/projects/new", Page::NewProject, Capability::Sales.requirement()),
            Route::new("/projects/:id", Page::ProjectDetail, RouteRequirement::Public),
            Route::new("/admin/users", Page::Users, Capability::Administration.requirement()),
            Route::new("/finance", Page::Finance, Capability::Finance.requirement()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use protrack_auth::{Resolution, Role, SessionState, User};

    fn as_role(role: Role) -> SessionState {
        SessionState::Authenticated(User::new("t", role))
    }

    #[test]
    fn new_project_is_not_captured_as_an_id() {
        let table = route_table(LOGIN_PATH).unwrap();
        let m = table.match_path("/projects/new").unwrap();
        assert_eq!(m.route.page, Page::NewProject);

        let m = table.match_path("/projects/0190a4f2").unwrap();
        assert_eq!(m.route.page, Page::ProjectDetail);
    }

    #[test]
    fn admin_pages_admit_admin_and_super_admin_only() {
        let table = route_table(LOGIN_PATH).unwrap();
        for role in Role::known() {
            let allowed = matches!(
                table.resolve("/admin/users", &as_role(role.clone())),
                Resolution::Render(_)
            );
            assert_eq!(allowed, role == Role::ADMIN || role == Role::SUPER_ADMIN, "{role}");
        }
    }

    #[test]
    fn accountant_is_denied_user_admin() {
        let table = route_table(LOGIN_PATH).unwrap();
        assert!(matches!(
            table.resolve("/admin/users", &as_role(Role::ACCOUNTANT)),
            Resolution::AccessDenied(_)
        ));
    }

    #[test]
    fn custom_login_path_is_used_for_redirects() {
        let table = route_table("/signin").unwrap();
        assert_eq!(
            table.resolve("/finance", &SessionState::Anonymous),
            Resolution::RedirectToLogin { login_path: "/signin" }
        );
    }
}
