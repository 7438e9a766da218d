//! Centralized error handling for picofetch

use std::fmt;
use std::io;

/// Custom error type for picofetch operations
#[derive(Debug)]
pub enum PicofetchError {
    /// I/O errors (file reading, command execution)
    Io(io::Error),
    /// Parsing errors (invalid data format)
    #[allow(dead_code)]
    Parse(String),
    /// System detection errors
    Detection(String),
}

impl fmt::Display for PicofetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicofetchError::Io(err) => write!(f, "I/O error: {}", err),
            PicofetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            PicofetchError::Detection(msg) => write!(f, "Detection error: {}", msg),
        }
    }
}

impl std::error::Error for PicofetchError {}

impl From<io::Error> for PicofetchError {
    fn from(error: io::Error) -> Self {
        PicofetchError::Io(error)
    }
}

/// Type alias for Results in picofetch
pub type Result<T> = std::result::Result<T, PicofetchError>;
