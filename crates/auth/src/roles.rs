use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for route and menu gating.
///
/// Roles are opaque, case-sensitive strings. The backend owns the vocabulary;
/// the well-known values are exposed as constants so call sites never spell
/// them out. There is no hierarchy at this layer: `SuperAdmin` does not imply
/// `Admin`. Expansion lives in [`crate::Capability`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("Admin"));
    pub const SUPER_ADMIN: Role = Role(Cow::Borrowed("SuperAdmin"));
    pub const SALES_EXECUTIVE: Role = Role(Cow::Borrowed("Sales Executive"));
    pub const ACCOUNTANT: Role = Role(Cow::Borrowed("Accountant"));
    pub const WIRELESS_ENGINEER: Role = Role(Cow::Borrowed("Wireless Engineer"));
    pub const IP_BROADBAND_ENGINEER: Role = Role(Cow::Borrowed("IP Broadband Engineer"));
    pub const SOLUTIONS: Role = Role(Cow::Borrowed("Solutions"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fixed vocabulary known to this client.
    pub fn known() -> [Role; 7] {
        [
            Role::ADMIN,
            Role::SUPER_ADMIN,
            Role::SALES_EXECUTIVE,
            Role::ACCOUNTANT,
            Role::WIRELESS_ENGINEER,
            Role::IP_BROADBAND_ENGINEER,
            Role::SOLUTIONS,
        ]
    }

    pub fn is_known(&self) -> bool {
        Self::known().iter().any(|r| r == self)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_case_sensitive() {
        assert_ne!(Role::new("admin"), Role::ADMIN);
        assert!(!Role::new("admin").is_known());
        assert!(Role::new(String::from("Admin")).is_known());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::SALES_EXECUTIVE).unwrap();
        assert_eq!(json, "\"Sales Executive\"");

        let role: Role = serde_json::from_str("\"IP Broadband Engineer\"").unwrap();
        assert_eq!(role, Role::IP_BROADBAND_ENGINEER);
    }
}
