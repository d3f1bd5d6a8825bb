//! Status probe at `/`.
use crate::{api::controllers::status, models::AppState};
use actix_web::{get, web, Responder};

/// Reports whether the gateway is configured, with the upstream host and identity.
#[get("/")]
async fn get_status(data: web::Data<AppState>) -> impl Responder {
    status::get_status(&data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(get_status);
}
