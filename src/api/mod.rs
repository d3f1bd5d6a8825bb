//! # API Module
//!
//! Contains the HTTP surface of the gateway.
//!
//! ## Structure
//!
//! * `controllers` - Request handling and relay orchestration
//! * `params` - Inbound parameter extraction
//! * `routes` - API endpoint definitions and routing

pub mod controllers;

pub mod params;

pub mod routes;
