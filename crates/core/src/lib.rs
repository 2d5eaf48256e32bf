//! `protrack-core`: domain building blocks shared by the client crates.
//!
//! This crate contains **pure domain** primitives (no IO, no transport).

pub mod error;
pub mod id;
pub mod project;
pub mod stage;

pub use error::{DomainError, DomainResult};
pub use id::{ProjectId, UserId};
pub use project::{NewProject, Project};
pub use stage::ProjectStage;
