//! Typed project endpoints used by the project pages.

use serde_json::json;

use protrack_auth::Capability;
use protrack_core::{DomainError, NewProject, Project, ProjectId, ProjectStage};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ProjectsApi {
    client: ApiClient,
}

impl ProjectsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.client.get("/projects").await
    }

    pub async fn get(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.client.get(&format!("/projects/{id}")).await
    }

    /// Validate the form locally, then create.
    pub async fn create(&self, form: NewProject) -> Result<Project, ApiError> {
        let form = form.validated()?;
        let project: Project = self.client.post("/projects", &form).await?;
        tracing::info!(project_id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    /// Move `project` to `target`, which must be its immediate successor.
    ///
    /// The linear rule and the caller's capability are checked before
    /// anything is sent; the backend remains the authority.
    pub async fn advance_stage(
        &self,
        project: &Project,
        target: ProjectStage,
    ) -> Result<Project, ApiError> {
        if !self
            .client
            .session()
            .has_capability(Capability::StageAdvancement)
        {
            return Err(DomainError::Unauthorized.into());
        }
        let next = project.stage.advance_to(target)?;

        let updated: Project = self
            .client
            .post(
                &format!("/projects/{}/stage", project.id),
                &json!({ "stage": next }),
            )
            .await?;

        tracing::info!(
            project_id = %project.id,
            from = %project.stage,
            to = %updated.stage,
            "project stage advanced"
        );
        Ok(updated)
    }
}
