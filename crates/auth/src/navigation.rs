//! Navigation menu builder.

use serde::{Deserialize, Serialize};

use crate::{RouteRequirement, SessionState};

/// One static menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub label: String,
    pub icon: String,
    pub path: String,
    #[serde(default)]
    pub requirement: RouteRequirement,
}

impl NavigationEntry {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            path: path.into(),
            requirement: RouteRequirement::Public,
        }
    }

    pub fn requires(mut self, requirement: RouteRequirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Whether this entry is shown for `session`.
    pub fn is_visible(&self, session: &SessionState) -> bool {
        match &self.requirement {
            RouteRequirement::Public => true,
            RouteRequirement::OneOf(roles) => session.has_any_role(roles),
        }
    }
}

/// Filter `entries` down to what `session` may see.
///
/// The result is an order-preserving subsequence of `entries`; nothing is
/// duplicated, reordered or modified. Safe to call on every render.
pub fn build_menu<'a>(entries: &'a [NavigationEntry], session: &SessionState) -> Vec<&'a NavigationEntry> {
    entries.iter().filter(|e| e.is_visible(session)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, Role, User};
    use proptest::prelude::*;

    fn menu() -> Vec<NavigationEntry> {
        vec![
            NavigationEntry::new("Dashboard", "home", "/"),
            NavigationEntry::new("Users", "people", "/admin/users")
                .requires(Capability::Administration.requirement()),
            NavigationEntry::new("Ledger", "book", "/finance")
                .requires(Capability::Finance.requirement()),
            NavigationEntry::new("Projects", "folder", "/projects"),
        ]
    }

    fn labels(entries: &[&NavigationEntry]) -> Vec<String> {
        entries.iter().map(|e| e.label.clone()).collect()
    }

    #[test]
    fn accountant_sees_finance_but_not_users() {
        let session = SessionState::Authenticated(User::new("ann", Role::ACCOUNTANT));
        let entries = menu();
        assert_eq!(
            labels(&build_menu(&entries, &session)),
            vec!["Dashboard", "Ledger", "Projects"]
        );
    }

    #[test]
    fn super_admin_sees_everything_in_order() {
        let session = SessionState::Authenticated(User::new("root", Role::SUPER_ADMIN));
        let entries = menu();
        assert_eq!(build_menu(&entries, &session).len(), entries.len());
    }

    #[test]
    fn anonymous_sees_only_public_entries() {
        let entries = menu();
        assert_eq!(
            labels(&build_menu(&entries, &SessionState::Anonymous)),
            vec!["Dashboard", "Projects"]
        );
    }

    fn arb_requirement() -> impl Strategy<Value = RouteRequirement> {
        prop_oneof![
            Just(RouteRequirement::Public),
            prop::collection::vec(0usize..7, 0..4)
                .prop_map(|idx| RouteRequirement::OneOf(idx.into_iter().map(|i| Role::known()[i].clone()).collect())),
        ]
    }

    fn arb_session() -> impl Strategy<Value = SessionState> {
        prop_oneof![
            Just(SessionState::Unknown),
            Just(SessionState::Anonymous),
            (0usize..7).prop_map(|i| SessionState::Authenticated(User::new("u", Role::known()[i].clone()))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the menu is an order-preserving subsequence of the input.
        #[test]
        fn menu_is_ordered_subsequence(
            reqs in prop::collection::vec(arb_requirement(), 0..12),
            session in arb_session(),
        ) {
            let entries: Vec<NavigationEntry> = reqs
                .into_iter()
                .enumerate()
                .map(|(i, req)| NavigationEntry::new(format!("e{i}"), "dot", format!("/e/{i}")).requires(req))
                .collect();

            let visible = build_menu(&entries, &session);
            prop_assert!(visible.len() <= entries.len());

            // Walk the input once; every visible entry must be found after the previous one.
            let mut cursor = 0usize;
            for item in &visible {
                let pos = entries[cursor..]
                    .iter()
                    .position(|e| std::ptr::eq(e, *item));
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or_default() + 1;
            }
        }
    }
}
