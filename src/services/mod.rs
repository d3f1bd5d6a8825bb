//! # Services Module
//!
//! Translation and execution of upstream calls.
//!
//! * `translator` - maps logical call requests onto the upstream request shape
//! * `executor` - performs outbound calls and classifies their outcome
//! * `whm_client` - in-process client built on the two above

mod executor;
pub use executor::*;

mod translator;
pub use translator::*;

mod whm_client;
pub use whm_client::*;
