mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, web};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxSkillRepo};
use use_cases::{contact::ContactHandler, project::ProjectHandler, skill::SkillHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub skill_handler: AppSkillHandler,
    pub contact_handler: AppContactHandler,
    pub token_service: JwtService,
    pub db_pool: sqlx::PgPool,
}

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, SqlxSkillRepo>;
pub type AppSkillHandler = SkillHandler<SqlxSkillRepo>;
pub type AppContactHandler = ContactHandler<SqlxContactRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let project_handler = ProjectHandler::new(
            SqlxProjectRepo::new(pool.clone()),
            SqlxSkillRepo::new(pool.clone()),
        );
        let skill_handler = SkillHandler::new(SqlxSkillRepo::new(pool.clone()));
        let contact_handler = ContactHandler::new(SqlxContactRepo::new(pool.clone()));

        AppState {
            project_handler,
            skill_handler,
            contact_handler,
            token_service: JwtService::new(config),
            db_pool: pool,
        }
    }
}
