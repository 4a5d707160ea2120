//! Placeholder REST API adapters.
//!
//! This module provides the reqwest implementation of the
//! `PlaceholderSource` port.

mod http_source;

pub use http_source::PlaceholderHttpSource;
