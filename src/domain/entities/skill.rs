use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MAX_SKILL_NAME_LENGTH: u64 = 50;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub id: i64,
    pub name: String,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewSkillRequest {
    #[serde(default)]
    #[validate(
        required(message = "Skill name is required"),
        length(min = 1, max = MAX_SKILL_NAME_LENGTH, message = "Skill name must be between 1 and 50 characters")
    )]
    pub name: Option<String>,
}
