//! # cPanel Gateway
//!
//! Credential-bearing HTTP relay for WHM API 1 and UAPI.
//!
//! The gateway accepts simplified requests, attaches the server-held WHM API
//! token, rewrites each request into the shape the WHM `json-api` expects and
//! relays the response back, normalizing every failure into one JSON envelope.
//!
//! ## Modules
//!
//! * `api` - HTTP routes and controllers
//! * `config` - Server settings and WHM credentials
//! * `constants` - Defaults and upstream protocol literals
//! * `logging` - Logger setup
//! * `metrics` - Prometheus registry and middleware
//! * `models` - Call, outcome, envelope and error types
//! * `services` - Call translation, execution and the in-process client

pub mod api;
pub mod config;
pub mod constants;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
