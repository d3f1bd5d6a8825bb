mod http_client;
pub use http_client::*;

mod logging;
pub use logging::*;

mod server;
pub use server::*;

mod upstream;
pub use upstream::*;
