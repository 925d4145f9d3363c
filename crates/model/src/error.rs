use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not complete: connection failures, rejected
    /// credentials, non-success statuses, malformed requests.
    Transport,
    /// The provider answered, but the body could not be read as an
    /// envelope at all.
    InvalidResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::InvalidResponse => write!(f, "Invalid response"),
        }
    }
}
