use chrono::{DateTime, Utc};
use serde::Serialize;

/// One edge of the project/skill relation, keyed by the id pair.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProjectSkill {
    pub project_id: i64,
    pub skill_id: i64,
    pub created_at: DateTime<Utc>,
}
