//! Error taxonomy and caller-safe classification.
//!
//! # Responsibility
//! - Define the single error type shared by every scratchpad operation.
//! - Map each failure to a fixed, non-leaking message for tool callers.
//!
//! # Invariants
//! - `user_message` never contains filesystem paths or OS error text, except
//!   for validation kinds whose messages are built only from caller input and
//!   workspace-relative locations.
//! - Full detail stays available through `Display` for operator logs.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub type ScratchpadResult<T> = Result<T, ScratchpadError>;

/// Failure raised anywhere between the gateway and the filesystem.
#[derive(Debug)]
pub enum ScratchpadError {
    /// Admission rejected by the rate limiter.
    RateLimited {
        retry_after: Duration,
        max_requests: usize,
        window: Duration,
    },
    /// Blocked pattern, missing argument or wrong argument type.
    InvalidInput(String),
    /// Path or filename outside the allowed layout.
    InvalidPath(String),
    /// Create target already exists (workspace-relative location).
    AlreadyExists(String),
    /// Template structure violated: a required header is absent.
    MissingSection(&'static str),
    /// No scratchpad has been created yet.
    NotFound,
    /// Content exceeds the configured byte limit.
    SizeExceeded { size: u64, max: u64 },
    /// File content is not valid UTF-8.
    Encoding(PathBuf),
    /// Underlying filesystem failure.
    Io(io::Error),
    /// Anything not covered above.
    Unknown(String),
}

/// Coarse failure category used for classification and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    InvalidInput,
    InvalidPath,
    AlreadyExists,
    MissingSection,
    NotFound,
    SizeExceeded,
    EncodingError,
    IoError,
    Unknown,
}

impl ErrorKind {
    /// Stable identifier used in structured log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::InvalidInput => "invalid_input",
            Self::InvalidPath => "invalid_path",
            Self::AlreadyExists => "already_exists",
            Self::MissingSection => "missing_section",
            Self::NotFound => "not_found",
            Self::SizeExceeded => "size_exceeded",
            Self::EncodingError => "encoding_error",
            Self::IoError => "io_error",
            Self::Unknown => "unknown",
        }
    }
}

impl ScratchpadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidPath(_) => ErrorKind::InvalidPath,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::MissingSection(_) => ErrorKind::MissingSection,
            Self::NotFound => ErrorKind::NotFound,
            Self::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            Self::Encoding(_) => ErrorKind::EncodingError,
            Self::Io(_) => ErrorKind::IoError,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the message that may be shown to a tool caller.
    ///
    /// Validation failures echo their own text; every other kind collapses to
    /// a fixed category message.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited {
                retry_after,
                max_requests,
                ..
            } => format!(
                "Rate limit exceeded. Please wait {:.1} seconds. (Max {max_requests} requests per minute)",
                retry_after.as_secs_f64()
            ),
            Self::InvalidInput(message) | Self::InvalidPath(message) => message.clone(),
            Self::AlreadyExists(location) => format!("Scratchpad already exists at: {location}"),
            Self::MissingSection(section) => {
                format!("Invalid scratchpad format: missing {section} section")
            }
            Self::NotFound => "Scratchpad file not found. Create one first.".to_string(),
            Self::SizeExceeded { .. } => "Scratchpad exceeds the maximum file size".to_string(),
            Self::Encoding(_) => "Invalid character encoding".to_string(),
            Self::Io(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                "Permission denied".to_string()
            }
            Self::Io(_) => "File system error".to_string(),
            Self::Unknown(_) => "An error occurred".to_string(),
        }
    }
}

impl Display for ScratchpadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimited {
                retry_after,
                max_requests,
                window,
            } => write!(
                f,
                "rate limit exceeded: {max_requests} requests per {}s, retry after {:.3}s",
                window.as_secs(),
                retry_after.as_secs_f64()
            ),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::InvalidPath(message) => write!(f, "invalid path: {message}"),
            Self::AlreadyExists(location) => write!(f, "scratchpad already exists: {location}"),
            Self::MissingSection(section) => write!(f, "missing section: {section}"),
            Self::NotFound => write!(f, "scratchpad not found"),
            Self::SizeExceeded { size, max } => {
                write!(f, "content size {size} bytes exceeds maximum {max} bytes")
            }
            Self::Encoding(path) => write!(f, "invalid UTF-8 in `{}`", path.display()),
            Self::Io(err) => write!(f, "{err}"),
            Self::Unknown(details) => write!(f, "unexpected failure: {details}"),
        }
    }
}

impl Error for ScratchpadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ScratchpadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ScratchpadError};
    use std::io;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn validation_messages_are_echoed() {
        let err = ScratchpadError::InvalidInput("Note is required".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.user_message(), "Note is required");
    }

    #[test]
    fn io_errors_never_leak_os_detail() {
        let err = ScratchpadError::from(io::Error::new(
            io::ErrorKind::Other,
            "disk quota exceeded on /home/secret",
        ));
        assert_eq!(err.kind(), ErrorKind::IoError);
        assert_eq!(err.user_message(), "File system error");

        let denied = ScratchpadError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.user_message(), "Permission denied");
    }

    #[test]
    fn encoding_error_hides_path() {
        let err = ScratchpadError::Encoding(PathBuf::from("/private/workspace/.idea/x.md"));
        assert!(!err.user_message().contains("private"));
        assert!(err.to_string().contains("private"));
    }

    #[test]
    fn rate_limit_message_reports_wait_time() {
        let err = ScratchpadError::RateLimited {
            retry_after: Duration::from_millis(2_500),
            max_requests: 60,
            window: Duration::from_secs(60),
        };
        assert_eq!(
            err.user_message(),
            "Rate limit exceeded. Please wait 2.5 seconds. (Max 60 requests per minute)"
        );
    }

    #[test]
    fn missing_section_names_the_section() {
        let err = ScratchpadError::MissingSection("Current Focus");
        assert_eq!(
            err.user_message(),
            "Invalid scratchpad format: missing Current Focus section"
        );
        assert_eq!(err.kind().as_str(), "missing_section");
    }
}
