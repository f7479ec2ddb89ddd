//! HTTP request handlers, organized by resource.

pub mod health;
pub mod sections;
pub mod tickets;

pub use health::{health_check, readiness_check};
