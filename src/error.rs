//! Error types

use std::fmt;
use std::io;

use crate::registry::Operation;

/// Result alias used by every socket operation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while issuing a socket operation
#[derive(Debug)]
pub enum Error {
    /// The OS rejected the request; carries the errno verbatim
    Os(io::Error),
    /// The current platform has no mechanism for the operation.
    /// No syscall was attempted.
    Unsupported(Operation),
    /// The kernel returned a value whose size does not match its ABI
    Decode {
        /// Name of the kernel type being decoded
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Argument cannot be represented in the kernel's C `int`
    InvalidArgument(&'static str),
}

impl Error {
    /// Whether this error means the platform lacks the operation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// The raw OS error code, if the failure came from a syscall
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Os(e) => e.raw_os_error(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Os(e) => write!(f, "OS error: {}", e),
            Self::Unsupported(op) => write!(f, "{} is not supported on this platform", op),
            Self::Decode {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{} size mismatch: expected {} bytes, got {}",
                what, expected, actual
            ),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Os(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Os(err)
    }
}
