use async_trait::async_trait;
use std::borrow::Cow;

use crate::{
    entities::skill::Skill,
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// All skills ordered by id
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError>;

    /// Skills whose id is in `ids`; unknown ids are simply absent from the result
    async fn find_skills_by_ids(&self, ids: &[i64]) -> Result<Vec<Skill>, AppError>;

    async fn create_skill(&self, name: &str) -> Result<Skill, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"SELECT id, name, created_at FROM skills ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"SELECT id, name, created_at FROM skills WHERE name = $1"#
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_skills_by_ids(&self, ids: &[i64]) -> Result<Vec<Skill>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let skills = sqlx::query_as::<_, Skill>(
            r#"SELECT id, name, created_at FROM skills WHERE id = ANY($1) ORDER BY id"#
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn create_skill(&self, name: &str) -> Result<Skill, AppError> {
        let mut tx = self.pool.begin().await?;

        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Skill already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        tx.commit().await?;

        Ok(skill)
    }
}
