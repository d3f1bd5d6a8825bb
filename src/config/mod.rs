//! Configuration read from the process environment.

mod credentials;
pub use credentials::*;

mod server_config;
pub use server_config::*;
