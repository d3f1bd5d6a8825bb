mod api_response;
pub use api_response::*;

mod app_state;
pub use app_state::*;

mod call;
pub use call::*;

mod error;
pub use error::*;

mod outcome;
pub use outcome::*;

mod secret_string;
pub use secret_string::*;
