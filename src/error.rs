//! Error types for world generation

use std::fmt;

/// Errors that can occur during world generation or queries
#[derive(Debug, Clone)]
pub enum WorldGenError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Site set cannot be triangulated (too few distinct points or all collinear)
    DegenerateSites(String),
}

impl fmt::Display for WorldGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldGenError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            WorldGenError::DegenerateSites(msg) => write!(f, "degenerate site set: {}", msg),
        }
    }
}

impl std::error::Error for WorldGenError {}

/// Result type alias for world generation operations
pub type Result<T> = std::result::Result<T, WorldGenError>;
