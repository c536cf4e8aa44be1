use async_trait::async_trait;
use sqlx::PgConnection;
use std::borrow::Cow;

use crate::{
    entities::{
        project::{Project, ProjectInsert, ProjectSummary, ProjectWithSkills},
        project_skill::ProjectSkill,
        skill::Skill,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects ordered by id, each with the names of its linked skills
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, AppError>;

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;

    /// Inserts the project and one bridge row per skill id in a single transaction
    async fn create_project_with_skills(
        &self,
        project: &ProjectInsert,
        skill_ids: &[i64],
    ) -> Result<ProjectWithSkills, AppError>;

    /// Overwrites the mutable fields and replaces every bridge row of the project
    /// in a single transaction
    async fn update_project_with_skills(
        &self,
        id: i64,
        project: &ProjectInsert,
        skill_ids: &[i64],
    ) -> Result<ProjectWithSkills, AppError>;

    async fn list_project_skills(&self, project_id: i64) -> Result<Vec<ProjectSkill>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, AppError> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT
                p.id,
                p.title,
                p.description,
                p.github_url,
                p.live_demo_url,
                p.image_url,
                COALESCE(
                    ARRAY_AGG(s.name::TEXT ORDER BY s.id) FILTER (WHERE s.id IS NOT NULL),
                    '{}'::TEXT[]
                ) AS skills
            FROM projects p
            LEFT JOIN project_skills ps ON ps.project_id = p.id
            LEFT JOIN skills s ON s.id = ps.skill_id
            GROUP BY p.id
            ORDER BY p.id
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>(r#"SELECT * FROM projects WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_project_with_skills(
        &self,
        project: &ProjectInsert,
        skill_ids: &[i64],
    ) -> Result<ProjectWithSkills, AppError> {
        let mut tx = self.pool.begin().await?;

        // RETURNING hands back the generated id before commit so the links can use it
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, github_url, live_demo_url, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.github_url)
        .bind(&project.live_demo_url)
        .bind(&project.image_url)
        .fetch_one(&mut *tx)
        .await?;

        link_skills(&mut tx, created.id, skill_ids).await?;
        let skills = linked_skills(&mut tx, created.id).await?;

        tx.commit().await?;

        Ok(ProjectWithSkills { project: created, skills })
    }

    async fn update_project_with_skills(
        &self,
        id: i64,
        project: &ProjectInsert,
        skill_ids: &[i64],
    ) -> Result<ProjectWithSkills, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET
                title = $1,
                description = $2,
                github_url = $3,
                live_demo_url = $4,
                image_url = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.github_url)
        .bind(&project.live_demo_url)
        .bind(&project.image_url)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        sqlx::query(r#"DELETE FROM project_skills WHERE project_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        link_skills(&mut tx, id, skill_ids).await?;
        let skills = linked_skills(&mut tx, id).await?;

        tx.commit().await?;

        Ok(ProjectWithSkills { project: updated, skills })
    }

    async fn list_project_skills(&self, project_id: i64) -> Result<Vec<ProjectSkill>, AppError> {
        let links = sqlx::query_as::<_, ProjectSkill>(
            r#"
            SELECT project_id, skill_id, created_at
            FROM project_skills
            WHERE project_id = $1
            ORDER BY skill_id
            "#
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}

async fn link_skills(conn: &mut PgConnection, project_id: i64, skill_ids: &[i64]) -> Result<(), AppError> {
    if skill_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO project_skills (project_id, skill_id)
        SELECT $1, UNNEST($2::BIGINT[])
        "#
    )
    .bind(project_id)
    .bind(skill_ids)
    .execute(conn)
    .await
    .map_err(|e| match e {
        // A skill vanished between validation and insert
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23503")) => {
            AppError::invalid_field("skill_ids", "Some skill IDs are invalid")
        }
        _ => AppError::from(e),
    })?;

    Ok(())
}

async fn linked_skills(conn: &mut PgConnection, project_id: i64) -> Result<Vec<Skill>, AppError> {
    let skills = sqlx::query_as::<_, Skill>(
        r#"
        SELECT s.id, s.name, s.created_at
        FROM project_skills ps
        JOIN skills s ON s.id = ps.skill_id
        WHERE ps.project_id = $1
        ORDER BY s.id
        "#
    )
    .bind(project_id)
    .fetch_all(conn)
    .await?;

    Ok(skills)
}
