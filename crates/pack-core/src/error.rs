use thiserror::Error;

/// Rejected scene configuration, reported before any entity is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{entity} {axis} must be a finite, positive extent (got {value})")]
    InvalidDimension {
        entity: &'static str,
        axis: &'static str,
        value: f32,
    },
    #[error("box segment count on {axis} must be at least 1")]
    InvalidSegments { axis: &'static str },
    #[error("a pack needs at least one card front")]
    EmptyDeck,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
