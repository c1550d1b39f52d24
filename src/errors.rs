use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhysicsError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to parse TOML: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Level-related errors
    #[error("Level file not found at path: {path}")]
    LevelFileNotFound { path: PathBuf },

    #[error("Corrupted level file: {reason}")]
    CorruptedLevelFile { reason: String },

    #[error("Level validation failed: {reason}")]
    LevelValidationFailed { reason: String },

    #[error("Invalid obstacle: {reason}")]
    InvalidObstacle { reason: String },

    #[error("Failed to load collision mask image: {0}")]
    MaskImage(#[from] image::ImageError),

    // Command-line errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Result type alias for all fallible operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;
