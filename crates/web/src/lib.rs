//! `protrack-web`
//!
//! **Responsibility:** the browser application shell.
//!
//! This crate provides:
//! - The application's page list, route table and navigation entries
//! - The wiring of config, session provider and API client into one context
//! - The Leptos frontend (wasm32 only)
//!
//! Everything outside `frontend` is plain Rust and tested natively.

pub mod context;
pub mod menu;
pub mod pages;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use context::AppContext;
pub use menu::navigation_entries;
pub use pages::Page;
pub use routes::route_table;
