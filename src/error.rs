//! # Error Types
//!
//! Custom error types for the mapping core using `thiserror`.

use thiserror::Error;

/// Main error type for the mapping core
#[derive(Debug, Error)]
pub enum CoreError {
    /// The name registry ran out of numeric discriminators for a base name
    #[error("too many controllers named '{base}'")]
    TooManyControllers { base: String },

    /// A loaded mapping profile does not match the device kind
    #[error("invalid mapping profile: expected {expected}, found {found}")]
    InvalidMappingProfile {
        expected: &'static str,
        found: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Mapping profile serialization errors
    #[error("profile serialization error: {0}")]
    ProfileSerialize(#[from] toml::ser::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the mapping core
pub type Result<T> = std::result::Result<T, CoreError>;
