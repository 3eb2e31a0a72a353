//! Project-specific utilities live here.

pub mod pagination;

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("project::{module}")
}
