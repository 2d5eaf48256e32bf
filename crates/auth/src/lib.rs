//! `protrack-auth`: pure role-gated navigation/routing authorization.
//!
//! This crate is intentionally decoupled from HTTP and rendering: it decides,
//! the client and web crates act on the decision.

pub mod capability;
pub mod guard;
pub mod navigation;
pub mod requirement;
pub mod roles;
pub mod route;
pub mod session;
pub mod user;

pub use capability::Capability;
pub use guard::{GuardDecision, GuardExplanation, evaluate, explain};
pub use navigation::{NavigationEntry, build_menu};
pub use requirement::{RequirementConfig, RouteConfigError, RouteRequirement};
pub use roles::Role;
pub use route::{Resolution, Route, RouteMatch, RouteTable};
pub use session::SessionState;
pub use user::{Credentials, User};
