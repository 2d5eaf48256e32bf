//! Static navigation entries.

use protrack_auth::{Capability, NavigationEntry};

/// Menu items in display order.
pub fn navigation_entries() -> Vec<NavigationEntry> {
    vec![
        NavigationEntry::new("Dashboard", "home", "/"),
        NavigationEntry::new("Projects", "folder", "/projects"),
        NavigationEntry::new("New Project", "plus", "/projects/new")
            .requires(Capability::Sales.requirement()),
        NavigationEntry::new("Finance", "receipt", "/finance")
            .requires(Capability::Finance.requirement()),
        NavigationEntry::new("Users", "people", "/admin/users")
            .requires(Capability::Administration.requirement()),
    ]
}
