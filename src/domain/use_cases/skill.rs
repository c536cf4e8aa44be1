use validator::Validate;

use crate::{
    entities::skill::{NewSkillRequest, SkillResponse},
    errors::AppError,
    repositories::skill::SkillRepository,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R) -> Self {
        SkillHandler { skill_repo }
    }

    /// Lists every skill
    pub async fn list_skills(&self) -> Result<Vec<SkillResponse>, AppError> {
        let skills = self.skill_repo.list_skills().await?;

        Ok(skills.into_iter().map(SkillResponse::from).collect())
    }

    /// Creates a skill, refusing names that are already taken
    pub async fn create_skill(&self, request: NewSkillRequest) -> Result<SkillResponse, AppError> {
        request.validate()?;

        let name = request.name.unwrap_or_default();

        if let Some(existing) = self.skill_repo.find_skill_by_name(&name).await? {
            return Err(already_exists(existing.id));
        }

        match self.skill_repo.create_skill(&name).await {
            Ok(skill) => Ok(skill.into()),
            // Lost a race with a concurrent insert of the same name
            Err(AppError::Conflict(msg)) => match self.skill_repo.find_skill_by_name(&name).await? {
                Some(existing) => Err(already_exists(existing.id)),
                None => Err(AppError::Conflict(msg)),
            },
            Err(e) => Err(e),
        }
    }
}

fn already_exists(id: i64) -> AppError {
    AppError::AlreadyExists {
        message: "Skill already exists".to_string(),
        id,
    }
}
