use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact_form")
            .route(web::post().to(contact::submit_contact_form))
    );
}
