//! Authenticated user record and login credentials.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use protrack_core::UserId;

use crate::Role;

/// Identity record returned by the backend on login / session check.
///
/// A user carries exactly one role. Profile fields the client does not model
/// are kept in `extra` so pages can still display them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            username: username.into(),
            role,
            full_name: None,
            email: None,
            extra: Map::new(),
        }
    }

    /// Name shown in the header: full name if known, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Login form payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profile_fields_are_preserved() {
        let json = serde_json::json!({
            "username": "jdoe",
            "role": "Wireless Engineer",
            "full_name": "Jane Doe",
            "region": "North"
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, Role::WIRELESS_ENGINEER);
        assert_eq!(user.display_name(), "Jane Doe");
        assert_eq!(user.extra.get("region"), Some(&Value::from("North")));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("jdoe", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }
}
