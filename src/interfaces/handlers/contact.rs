use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact::ContactForm, errors::AppError, AppState};

#[instrument(skip(state, form))]
pub async fn submit_contact_form(
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .submit_contact_form(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
