//! Error types for the blast index
//!
//! Only configuration misuse is a hard failure. Runtime paths (insert,
//! update, remove, query) report expected conditions through return values.

use std::fmt;

/// Result type for blast index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Blast index errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Octree configuration rejected at construction (depth, cell size)
    InvalidConfig(String),

    /// Identity has no back-reference (never inserted, or already removed)
    UnknownItem(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::UnknownItem(msg) => write!(f, "Unknown item: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
