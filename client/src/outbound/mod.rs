//! Outbound adapters implementing domain ports.
//!
//! - **placeholder**: reqwest client for the JSONPlaceholder REST API
//! - **phone**: libphonenumber-backed phone validity oracle
//! - **headless**: in-process map, focus and document adapters used by the
//!   CLI and behaviour tests in place of a browser
//!
//! Adapters translate between domain types and their external
//! representation. They contain no business logic.

pub mod headless;
pub mod phone;
pub mod placeholder;
