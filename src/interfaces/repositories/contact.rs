use async_trait::async_trait;

use crate::{
    entities::contact::{ContactInsert, ContactMessage},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactMessage, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<ContactMessage, AppError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contacts (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, message, submitted_at
            "#
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(saved)
    }
}
