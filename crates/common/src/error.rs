//! Error types shared across Badgesmith crates.

use std::path::PathBuf;

/// Top-level error type for Badgesmith operations.
#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Font error: {message}")]
    Font { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BadgeError.
pub type BadgeResult<T> = Result<T, BadgeError>;

impl BadgeError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    /// Map a missing-file I/O error onto `FileNotFound`, keeping the path.
    pub fn from_io_at(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}
