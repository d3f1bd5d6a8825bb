//! WHM API 1 relay route. Calls run as the configured administrative identity.
use crate::{api::controllers::relay, models::AppState};
use actix_web::{route, web, HttpRequest, Responder};

/// Relays a WHM API 1 function.
///
/// GET parameters come from the query string; POST parameters from a form or
/// JSON body.
#[route("/whmapi/{function}", method = "GET", method = "POST")]
async fn whmapi(
    function: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    relay::whm_api(function.into_inner(), &req, &body, &data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(whmapi);
}
