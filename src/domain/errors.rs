/// User-facing text for every capture failure.
pub const CAPTURE_FAILED_MESSAGE: &str = "capture failed, please retry";

/// Errors surfaced to callers of the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Opaque capture failure; the technical cause is only logged.
    CaptureFailed,
    RenderingError(String),
    ValidationError(String),
    DownloadError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::CaptureFailed => write!(f, "{}", CAPTURE_FAILED_MESSAGE),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DownloadError(msg) => write!(f, "Download Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Simple convenience type aliases
pub type CaptureOutcome<T> = Result<T, AppError>;
pub type ValidationResult<T> = Result<T, AppError>;
