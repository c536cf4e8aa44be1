use validator::Validate;

use crate::{
    entities::contact::{ContactForm, ContactResponse, ContactSubmission},
    errors::AppError,
    repositories::contact::ContactRepository,
};

pub const CONTACT_RECEIVED_MESSAGE: &str = "Contact submitted successfully!";

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    /// Validates a contact form submission and stores it
    pub async fn submit_contact_form(&self, form: ContactForm) -> Result<ContactResponse, AppError> {
        let submission = ContactSubmission::from(form);
        submission.validate()?;

        let contact = submission.prepare_for_insert();

        let saved = self.contact_repo.create_contact(&contact).await
            .map_err(|e| {
                tracing::error!("Failed to store contact submission: {}", e);
                AppError::InternalError(e.to_string())
            })?;

        tracing::info!(contact_id = saved.id, "Contact submission stored");

        Ok(ContactResponse {
            message: CONTACT_RECEIVED_MESSAGE.to_string(),
        })
    }
}
