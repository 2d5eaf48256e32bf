//! Static route table with guarded resolution.
//!
//! Pages register once, in order; the first pattern matching a path wins.
//! Patterns are literal segments plus `:name` captures (`/projects/:id`).

use std::collections::BTreeMap;

use crate::guard::{self, GuardDecision, GuardExplanation};
use crate::{RequirementConfig, RouteConfigError, RouteRequirement, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<P> {
    pub path: String,
    pub page: P,
    pub requirement: RouteRequirement,
    /// Unguarded routes (the login page) render regardless of session.
    pub guarded: bool,
}

impl<P> Route<P> {
    pub fn new(path: impl Into<String>, page: P, requirement: RouteRequirement) -> Self {
        Self {
            path: path.into(),
            page,
            requirement,
            guarded: true,
        }
    }

    /// A route outside the guard, such as the login page.
    pub fn open(path: impl Into<String>, page: P) -> Self {
        Self {
            path: path.into(),
            page,
            requirement: RouteRequirement::Public,
            guarded: false,
        }
    }

    /// Build a guarded route from configuration data.
    pub fn from_config(
        path: impl Into<String>,
        page: P,
        config: RequirementConfig,
    ) -> Result<Self, RouteConfigError> {
        let path = path.into();
        let requirement = config.resolve(&path)?;
        Ok(Self::new(path, page, requirement))
    }
}

/// A matched route plus its captured path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, P> {
    pub route: &'a Route<P>,
    pub params: BTreeMap<String, String>,
}

impl<P> RouteMatch<'_, P> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// What the application shell should do for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a, P> {
    Loading,
    RedirectToLogin { login_path: &'a str },
    AccessDenied(GuardExplanation),
    Render(RouteMatch<'a, P>),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    routes: Vec<Route<P>>,
    login_path: String,
}

impl<P> RouteTable<P> {
    /// Validate and freeze a route table.
    pub fn new(login_path: impl Into<String>, routes: Vec<Route<P>>) -> Result<Self, RouteConfigError> {
        // `/projects/:id` and `/projects/:pid` match the same paths.
        let mut seen: Vec<Vec<&str>> = Vec::with_capacity(routes.len());
        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(RouteConfigError::InvalidPath(route.path.clone()));
            }
            let shape = pattern_shape(&route.path);
            if seen.contains(&shape) {
                return Err(RouteConfigError::DuplicatePath(route.path.clone()));
            }
            seen.push(shape);
        }

        let login_path = login_path.into();
        if !login_path.starts_with('/') {
            return Err(RouteConfigError::InvalidPath(login_path));
        }

        Ok(Self { routes, login_path })
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn routes(&self) -> &[Route<P>] {
        &self.routes
    }

    /// First route whose pattern matches `path` (query and fragment ignored).
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, P>> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments = split_segments(path);

        self.routes.iter().find_map(|route| {
            let pattern = split_segments(&route.path);
            if pattern.len() != segments.len() {
                return None;
            }

            let mut params = BTreeMap::new();
            for (pat, seg) in pattern.iter().zip(&segments) {
                match pat.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), (*seg).to_string());
                    }
                    None if pat == seg => {}
                    None => return None,
                }
            }
            Some(RouteMatch { route, params })
        })
    }

    /// Match `path` and run the guard for the current session.
    pub fn resolve(&self, path: &str, session: &SessionState) -> Resolution<'_, P> {
        let Some(matched) = self.match_path(path) else {
            return Resolution::NotFound;
        };

        if !matched.route.guarded {
            return Resolution::Render(matched);
        }

        let explanation = guard::explain(session, &matched.route.requirement);
        match explanation.decision {
            GuardDecision::Loading => Resolution::Loading,
            GuardDecision::RedirectToLogin => Resolution::RedirectToLogin {
                login_path: &self.login_path,
            },
            GuardDecision::AccessDenied => Resolution::AccessDenied(explanation),
            GuardDecision::Render => Resolution::Render(matched),
        }
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Segments with every `:param` collapsed to one wildcard.
fn pattern_shape(path: &str) -> Vec<&str> {
    split_segments(path)
        .into_iter()
        .map(|seg| if seg.starts_with(':') { ":" } else { seg })
        .collect()
}
