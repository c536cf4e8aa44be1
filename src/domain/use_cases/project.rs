use validator::Validate;

use crate::{
    entities::project::{ProjectCreatedResponse, ProjectRequest, ProjectResponse, ProjectSummary},
    errors::AppError,
    repositories::{project::ProjectRepository, skill::SkillRepository},
};

pub struct ProjectHandler<P, S>
where
    P: ProjectRepository,
    S: SkillRepository,
{
    pub project_repo: P,
    pub skill_repo: S,
}

impl<P, S> ProjectHandler<P, S>
where
    P: ProjectRepository,
    S: SkillRepository,
{
    pub fn new(project_repo: P, skill_repo: S) -> Self {
        ProjectHandler { project_repo, skill_repo }
    }

    /// Lists every project with the names of its skills
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, AppError> {
        self.project_repo.list_projects().await
    }

    /// Creates a project and links it to the requested skills
    pub async fn create_project(&self, request: ProjectRequest) -> Result<ProjectCreatedResponse, AppError> {
        request.validate()?;

        let skill_ids = self.validated_skill_ids(&request).await?;
        let project = request.prepare_for_insert();

        let created = self.project_repo
            .create_project_with_skills(&project, &skill_ids)
            .await?;

        tracing::info!(project_id = created.project.id, skills = skill_ids.len(), "Project created");

        Ok(created.into())
    }

    /// Overwrites a project and replaces its skill links with the requested set.
    /// The body is only interpreted once the project is known to exist.
    pub async fn update_project(&self, id: i64, body: serde_json::Value) -> Result<ProjectResponse, AppError> {
        if self.project_repo.get_project_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Project not found".to_string()));
        }

        let request = ProjectRequest::from_json(body)?;
        request.validate()?;

        let skill_ids = self.validated_skill_ids(&request).await?;
        let project = request.prepare_for_insert();

        let updated = self.project_repo
            .update_project_with_skills(id, &project, &skill_ids)
            .await?;

        tracing::info!(project_id = id, skills = skill_ids.len(), "Project updated");

        Ok(updated.into())
    }

    /// Every requested id must match an existing skill. Duplicates are collapsed
    /// before counting, so `[1, 1]` is accepted when skill 1 exists.
    async fn validated_skill_ids(&self, request: &ProjectRequest) -> Result<Vec<i64>, AppError> {
        let requested = request.unique_skill_ids();
        if requested.is_empty() {
            return Ok(requested);
        }

        let found = self.skill_repo.find_skills_by_ids(&requested).await?;

        if found.len() != requested.len() {
            return Err(AppError::invalid_field("skill_ids", "Some skill IDs are invalid"));
        }

        Ok(requested)
    }
}
