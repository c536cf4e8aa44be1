use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::skill::{Skill, SkillResponse},
    errors::AppError,
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 100;
const MAX_URL_LENGTH: u64 = 255;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project row with the names of its linked skills, ordered by skill id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub image_url: Option<String>,
    pub skills: Vec<String>,
}

/// A project together with the skills currently linked to it through the bridge.
#[derive(Debug, Clone)]
pub struct ProjectWithSkills {
    pub project: Project,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub image_url: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectCreatedResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub skills: Vec<SkillResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub live_demo_url: Option<String>,
    pub image_url: Option<String>,
    pub skills: Vec<SkillResponse>,
}

impl From<ProjectWithSkills> for ProjectCreatedResponse {
    fn from(linked: ProjectWithSkills) -> Self {
        Self {
            id: linked.project.id,
            title: linked.project.title,
            description: linked.project.description,
            skills: linked.skills.into_iter().map(SkillResponse::from).collect(),
        }
    }
}

impl From<ProjectWithSkills> for ProjectResponse {
    fn from(linked: ProjectWithSkills) -> Self {
        let project = linked.project;
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            github_url: project.github_url,
            live_demo_url: project.live_demo_url,
            image_url: project.image_url,
            skills: linked.skills.into_iter().map(SkillResponse::from).collect(),
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

/// Body shared by `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    #[serde(default)]
    #[validate(
        required(message = "Project title is required"),
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Project title must be between 1 and 100 characters")
    )]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH, message = "URL must be at most 255 characters"))]
    pub github_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH, message = "URL must be at most 255 characters"))]
    pub live_demo_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH, message = "URL must be at most 255 characters"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub skill_ids: Option<Vec<i64>>,
}

// ───── Insert Preparation Logic ─────────────────────────────────────

impl ProjectRequest {
    /// Reads a request from an already-parsed JSON body. Fields of the wrong
    /// type are reported as a validation failure on `body`.
    pub fn from_json(body: serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(body).map_err(|e| {
            AppError::invalid_field("body", &format!("Invalid project body: {}", e))
        })
    }

    /// Requested skill ids as a sorted set; repeated ids collapse into one link.
    pub fn unique_skill_ids(&self) -> Vec<i64> {
        self.skill_ids
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn prepare_for_insert(&self) -> ProjectInsert {
        ProjectInsert {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            github_url: self.github_url.clone(),
            live_demo_url: self.live_demo_url.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_ids_default_to_empty() {
        let request: ProjectRequest = serde_json::from_str(r#"{"title": "Site"}"#).unwrap();

        assert!(request.unique_skill_ids().is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn null_skill_ids_are_treated_as_empty() {
        let request: ProjectRequest =
            serde_json::from_str(r#"{"title": "Site", "skill_ids": null}"#).unwrap();

        assert!(request.unique_skill_ids().is_empty());
    }

    #[test]
    fn mistyped_fields_are_reported_on_body() {
        let err = ProjectRequest::from_json(serde_json::json!({"title": 123})).unwrap_err();

        match err {
            AppError::ValidationError(fields) => assert_eq!(fields[0].field, "body"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn json_body_reads_like_a_typed_request() {
        let request = ProjectRequest::from_json(serde_json::json!({
            "title": "Site",
            "skill_ids": [2, 2],
        }))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Site"));
        assert_eq!(request.unique_skill_ids(), vec![2]);
    }

    #[test]
    fn duplicate_skill_ids_collapse() {
        let request = ProjectRequest {
            title: Some("Site".into()),
            skill_ids: Some(vec![3, 1, 3, 2, 1]),
            ..Default::default()
        };

        assert_eq!(request.unique_skill_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_or_empty_title_fails_validation() {
        let missing: ProjectRequest = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        let empty = ProjectRequest { title: Some(String::new()), ..Default::default() };

        assert!(missing.validate().unwrap_err().field_errors().contains_key("title"));
        assert!(empty.validate().unwrap_err().field_errors().contains_key("title"));
    }

    #[test]
    fn overlong_url_fails_validation() {
        let request = ProjectRequest {
            title: Some("Site".into()),
            github_url: Some(format!("https://github.com/{}", "a".repeat(255))),
            ..Default::default()
        };

        assert!(request.validate().unwrap_err().field_errors().contains_key("github_url"));
    }

    #[test]
    fn response_lists_linked_skills() {
        let now = Utc::now();
        let linked = ProjectWithSkills {
            project: Project {
                id: 7,
                title: "Site".into(),
                description: None,
                github_url: Some("https://github.com/me/site".into()),
                live_demo_url: None,
                image_url: None,
                created_at: now,
                updated_at: now,
            },
            skills: vec![
                Skill { id: 1, name: "Rust".into(), created_at: now },
                Skill { id: 2, name: "SQL".into(), created_at: now },
            ],
        };

        let created = ProjectCreatedResponse::from(linked.clone());
        let full = ProjectResponse::from(linked);

        assert_eq!(created.id, 7);
        assert_eq!(created.skills, full.skills);
        assert_eq!(full.github_url.as_deref(), Some("https://github.com/me/site"));
        assert_eq!(full.skills[1], SkillResponse { id: 2, name: "SQL".into() });
    }

    #[test]
    fn prepare_for_insert_copies_mutable_fields() {
        let request = ProjectRequest {
            title: Some("Site".into()),
            description: Some("Portfolio".into()),
            image_url: Some("https://img.example/site.png".into()),
            ..Default::default()
        };

        let insert = request.prepare_for_insert();

        assert_eq!(insert.title, "Site");
        assert_eq!(insert.description.as_deref(), Some("Portfolio"));
        assert_eq!(insert.github_url, None);
        assert_eq!(insert.image_url.as_deref(), Some("https://img.example/site.png"));
    }
}
