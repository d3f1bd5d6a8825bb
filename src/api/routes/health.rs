//! Liveness route for load balancers and process supervisors.
//!
//! `GET /health` answers `OK` whenever the gateway process is serving, with or
//! without WHM credentials. Whether relaying is possible is reported by `GET /`.
use actix_web::{get, web, HttpResponse, Responder};

#[get("/health")]
async fn liveness() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness);
}
