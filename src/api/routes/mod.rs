//! # API Routes Module
//!
//! Configures HTTP routes for the gateway.
//!
//! ## Routes
//!
//! * `/` - Configuration status probe
//! * `/health` - Liveness check
//! * `/metrics` - Prometheus exposition
//! * `/whmapi/{function}` - WHM API 1 calls
//! * `/uapi/{user}/{module}/{function}` - UAPI calls proxied through WHM

pub mod health;
pub mod metrics;
pub mod status;
pub mod uapi;
pub mod whmapi;

use actix_web::web;
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(status::init)
        .configure(health::init)
        .configure(metrics::init)
        .configure(whmapi::init)
        .configure(uapi::init);
}
