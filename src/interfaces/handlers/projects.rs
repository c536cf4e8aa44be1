use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::project::ProjectRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_projects(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler
        .create_project(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<serde_json::Value>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler
        .update_project(project_id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}
