//! # API Controllers Module
//!
//! Handles HTTP endpoint logic for the gateway.
//!
//! ## Controllers
//!
//! * `relay` - WHM API and proxied UAPI calls
//! * `status` - Configuration status probe

pub mod relay;
pub mod status;
