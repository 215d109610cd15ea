use thiserror::Error;

#[derive(Error, Debug)]
pub enum BallastError {
    // Configuration validation errors
    #[error("Unexpected value in package \"{package}\": {field} must be {expected}, \"{actual}\" given")]
    UnexpectedValue {
        package: String,
        field: String,
        expected: String,
        actual: String,
    },

    // Download errors
    #[error("Download failed for \"{name}\": {reason}")]
    DownloadFailed { name: String, reason: String },

    #[error("Checksum mismatch for \"{name}\"")]
    ChecksumMismatch { name: String },

    // Installation errors
    #[error("Installation failed: {0}")]
    InstallationFailed(String),

    // Tracking state serialization errors
    #[error("Failed to encode tracking data: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BallastError {
    /// True for errors raised by the filter chain over the raw configuration.
    pub fn is_validation(&self) -> bool {
        matches!(self, BallastError::UnexpectedValue { .. })
    }
}

pub type Result<T> = std::result::Result<T, BallastError>;
