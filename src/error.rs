//! Error types for iwmode

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum IwmodeError {
    /// IO error
    Io(io::Error),
    /// Command could not be launched, or ended abnormally
    CommandFailed { cmd: String, code: Option<i32>, stderr: String },
    /// Command did not finish within the configured timeout
    Timeout(String),
    /// Invalid parameter
    InvalidParameter(String),
    /// Configuration error
    ConfigError(String),
    /// Permission denied
    PermissionDenied(String),
    /// Parse error
    ParseError(String),
}

impl fmt::Display for IwmodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IwmodeError::Io(e) => write!(f, "IO error: {}", e),
            IwmodeError::CommandFailed { cmd, code, stderr } => {
                if let Some(code) = code {
                    write!(f, "Command '{}' failed with code {}: {}", cmd, code, stderr)
                } else {
                    write!(f, "Command '{}' failed: {}", cmd, stderr)
                }
            }
            IwmodeError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            IwmodeError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            IwmodeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            IwmodeError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            IwmodeError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for IwmodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IwmodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IwmodeError {
    fn from(error: io::Error) -> Self {
        IwmodeError::Io(error)
    }
}

impl From<serde_json::Error> for IwmodeError {
    fn from(error: serde_json::Error) -> Self {
        IwmodeError::ParseError(error.to_string())
    }
}

pub type IwmodeResult<T> = Result<T, IwmodeError>;
