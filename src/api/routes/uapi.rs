//! UAPI relay route. Calls are proxied through WHM's `cpanel` function on
//! behalf of the named cPanel account.
use crate::{api::controllers::relay, models::AppState};
use actix_web::{route, web, HttpRequest, Responder};

/// Relays a UAPI function for `user`.
#[route("/uapi/{user}/{module}/{function}", method = "GET", method = "POST")]
async fn uapi(
    path: web::Path<(String, String, String)>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let (user, module, function) = path.into_inner();
    relay::uapi(user, module, function, &req, &body, &data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(uapi);
}
