use actix_web::{get, HttpResponse, Responder};

use crate::constants::API_WELCOME_MESSAGE;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": API_WELCOME_MESSAGE,
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
