mod mocks;

use chrono::Utc;
use mocks::*;
use portfolio_api::{
    entities::contact::{ContactForm, ContactInsert, ContactMessage},
    errors::AppError,
    use_cases::contact::{ContactHandler, CONTACT_RECEIVED_MESSAGE},
};

fn form(name: &str, email: &str, phone: Option<&str>, message: &str) -> ContactForm {
    ContactForm {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        phone: phone.map(str::to_string),
        message: Some(message.to_string()),
    }
}

fn stored(insert: &ContactInsert) -> ContactMessage {
    ContactMessage {
        id: 1,
        name: insert.name.clone(),
        email: insert.email.clone(),
        phone: insert.phone.clone(),
        message: insert.message.clone(),
        submitted_at: Utc::now(),
    }
}

#[tokio::test]
async fn valid_submission_is_trimmed_and_stored() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact()
        .withf(|c| {
            *c == ContactInsert {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: None,
                message: "Hi".into(),
            }
        })
        .times(1)
        .returning(|c| Ok(stored(c)));

    let handler = ContactHandler::new(repo);
    let response = handler
        .submit_contact_form(form("  Ada ", " ada@example.com ", Some("   "), " Hi "))
        .await
        .unwrap();

    assert_eq!(response.message, CONTACT_RECEIVED_MESSAGE);
}

#[tokio::test]
async fn phone_is_kept_when_present() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact()
        .withf(|c| c.phone.as_deref() == Some("+1 555-123-4567"))
        .times(1)
        .returning(|c| Ok(stored(c)));

    let handler = ContactHandler::new(repo);
    let result = handler
        .submit_contact_form(form("Ada", "ada@example.com", Some("+1 555-123-4567"), "Hi"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn every_invalid_field_is_reported_and_nothing_is_stored() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact().never();

    let handler = ContactHandler::new(repo);
    let err = handler
        .submit_contact_form(form("A", "bad", Some("12"), "Hi"))
        .await
        .unwrap_err();

    assert_eq!(validation_fields(err), vec!["email", "phone"]);
}

#[tokio::test]
async fn empty_form_reports_all_required_fields() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact().never();

    let handler = ContactHandler::new(repo);
    let err = handler.submit_contact_form(ContactForm::default()).await.unwrap_err();

    assert_eq!(validation_fields(err), vec!["email", "message", "name"]);
}

#[tokio::test]
async fn storage_failure_is_an_internal_error() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact()
        .returning(|_| Err(AppError::Conflict("constraint".into())));

    let handler = ContactHandler::new(repo);
    let err = handler
        .submit_contact_form(form("Ada", "ada@example.com", None, "Hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InternalError(_)));
}
