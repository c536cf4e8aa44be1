#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use portfolio_api::{
    entities::{
        contact::{ContactInsert, ContactMessage},
        project::{Project, ProjectInsert, ProjectSummary, ProjectWithSkills},
        project_skill::ProjectSkill,
        skill::Skill,
    },
    errors::AppError,
    repositories::{
        contact::ContactRepository,
        project::ProjectRepository,
        skill::SkillRepository,
    },
};

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn list_projects(&self) -> Result<Vec<ProjectSummary>, AppError>;
        async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;
        async fn create_project_with_skills(
            &self,
            project: &ProjectInsert,
            skill_ids: &[i64],
        ) -> Result<ProjectWithSkills, AppError>;
        async fn update_project_with_skills(
            &self,
            id: i64,
            project: &ProjectInsert,
            skill_ids: &[i64],
        ) -> Result<ProjectWithSkills, AppError>;
        async fn list_project_skills(&self, project_id: i64) -> Result<Vec<ProjectSkill>, AppError>;
    }
}

mock! {
    pub SkillRepo {}

    #[async_trait]
    impl SkillRepository for SkillRepo {
        async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;
        async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError>;
        async fn find_skills_by_ids(&self, ids: &[i64]) -> Result<Vec<Skill>, AppError>;
        async fn create_skill(&self, name: &str) -> Result<Skill, AppError>;
    }
}

mock! {
    pub ContactRepo {}

    #[async_trait]
    impl ContactRepository for ContactRepo {
        async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactMessage, AppError>;
    }
}

pub fn skill(id: i64, name: &str) -> Skill {
    Skill {
        id,
        name: name.to_string(),
        created_at: Utc::now(),
    }
}

pub fn project(id: i64, insert: &ProjectInsert) -> Project {
    let now = Utc::now();
    Project {
        id,
        title: insert.title.clone(),
        description: insert.description.clone(),
        github_url: insert.github_url.clone(),
        live_demo_url: insert.live_demo_url.clone(),
        image_url: insert.image_url.clone(),
        created_at: now,
        updated_at: now,
    }
}

pub fn existing_project(id: i64, title: &str) -> Project {
    project(id, &ProjectInsert {
        title: title.to_string(),
        description: None,
        github_url: None,
        live_demo_url: None,
        image_url: None,
    })
}

/// Builds the repository result for a write that linked `ids`, naming skills `skill-{id}`.
pub fn linked(id: i64, insert: &ProjectInsert, ids: &[i64]) -> ProjectWithSkills {
    ProjectWithSkills {
        project: project(id, insert),
        skills: ids.iter().map(|i| skill(*i, &format!("skill-{i}"))).collect(),
    }
}

pub fn validation_fields(err: AppError) -> Vec<String> {
    match err {
        AppError::ValidationError(fields) => fields.into_iter().map(|f| f.field).collect(),
        other => panic!("expected a validation error, got {other:?}"),
    }
}
