use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum RcompError {
    /// Base URI could not be turned into an endpoint.
    MalformedEndpoint {
        uri: String,
        reason: String,
    },
    /// A file referenced by a command argument could not be read.
    FileRead {
        path: String,
        reason: String,
    },
    Transport {
        context: String,
        reason: String,
    },
    Decode {
        context: String,
        reason: String,
    },
    /// Server answered with a non-success HTTP status.
    Status {
        context: String,
        status: u16,
        body: String,
    },
    PollDeadlineExceeded {
        job_id: String,
        waited: Duration,
    },
}

impl fmt::Display for RcompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RcompError::MalformedEndpoint { uri, reason } => {
                write!(f, "Malformed server URI '{uri}': {reason}")
            }
            RcompError::FileRead { path, reason } => {
                write!(f, "Failed to read file '{path}': {reason}")
            }
            RcompError::Transport { context, reason } => {
                write!(f, "Transport error in {context}: {reason}")
            }
            RcompError::Decode { context, reason } => {
                write!(f, "Failed to decode response in {context}: {reason}")
            }
            RcompError::Status {
                context,
                status,
                body,
            } => {
                if body.is_empty() {
                    write!(f, "Server error in {context}: HTTP {status}")
                } else {
                    write!(f, "Server error in {context}: HTTP {status}: {body}")
                }
            }
            RcompError::PollDeadlineExceeded { job_id, waited } => {
                write!(
                    f,
                    "Job {job_id} did not complete within {:.1}s",
                    waited.as_secs_f64()
                )
            }
        }
    }
}

impl std::error::Error for RcompError {}

impl RcompError {
    /// Errors worth another attempt on the next poll tick.
    pub fn is_transient(&self) -> bool {
        match self {
            RcompError::Transport { .. } | RcompError::Decode { .. } => true,
            RcompError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RcompError::Status { status: 404, .. })
    }

    pub fn from_io_error(e: std::io::Error, path: &str) -> Self {
        RcompError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_transport_error(e: impl fmt::Display, context: &str) -> Self {
        RcompError::Transport {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_decode_error(e: impl fmt::Display, context: &str) -> Self {
        RcompError::Decode {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }
}
