//! Project read model and create payload (matches the REST response shape).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ProjectId;
use crate::stage::ProjectStage;

/// A tracked project as returned by `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub stage: ProjectStage,
    #[serde(default)]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload posted by the "new project" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl NewProject {
    /// Trim the form fields and reject blank required ones.
    pub fn validated(self) -> DomainResult<Self> {
        let name = self.name.trim().to_string();
        let client = self.client.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("project name is required"));
        }
        if client.is_empty() {
            return Err(DomainError::validation("client is required"));
        }
        let owner = self
            .owner
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());
        Ok(Self { name, client, owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_and_drops_blank_owner() {
        let form = NewProject {
            name: "  Tower upgrade ".to_string(),
            client: "Acme Telecom".to_string(),
            owner: Some("   ".to_string()),
        };

        let form = form.validated().unwrap();
        assert_eq!(form.name, "Tower upgrade");
        assert_eq!(form.owner, None);
    }

    #[test]
    fn validated_rejects_blank_name() {
        let form = NewProject {
            name: " ".to_string(),
            client: "Acme".to_string(),
            owner: None,
        };
        assert!(matches!(form.validated(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn project_decodes_without_owner() {
        let json = serde_json::json!({
            "id": "0190a4f2-8c4e-7cc4-9a43-000000000001",
            "name": "Fiber backhaul",
            "client": "Metro ISP",
            "stage": "Quotation",
            "created_at": "2024-05-01T10:00:00Z"
        });
        let project: Project = serde_json::from_value(json).unwrap();
        assert_eq!(project.stage, ProjectStage::Quotation);
        assert!(project.owner.is_none());
    }
}
