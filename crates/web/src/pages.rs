//! Routable pages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    Dashboard,
    Projects,
    NewProject,
    ProjectDetail,
    Users,
    Finance,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Sign in",
            Page::Dashboard => "Dashboard",
            Page::Projects => "Projects",
            Page::NewProject => "New project",
            Page::ProjectDetail => "Project",
            Page::Users => "Users",
            Page::Finance => "Finance",
        }
    }
}
