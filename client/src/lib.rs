//! Headless client core for the social-feed demo.
//!
//! The crate is a hexagonal modular monolith: `domain` holds view models,
//! validation and ports; `outbound` holds adapters for the placeholder REST
//! API, phone-number metadata and the headless browser capabilities used by
//! the CLI and tests.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::ClientSettings;
