mod api;
pub use api::*;

mod config;
pub use config::*;
