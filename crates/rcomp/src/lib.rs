//! Core types for talking to an rcomp remote command-execution server.
//!
//! This crate is transport-free: it resolves endpoints, prepares argument
//! vectors and defines the wire data model. The HTTP client lives in
//! `rcomp-http`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub mod argv;
pub mod endpoint;
pub mod error;
pub mod telemetry;

pub use argv::{FileArgRule, decode_payload, encode_payload, prepare_argv};
pub use endpoint::{Endpoint, Scheme};
pub use error::RcompError;

// Re-export logging macros for consistent usage across the crates
pub use log::{debug, error, info, trace, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URI of the server; `None` means the canonical public endpoint.
    pub base_uri: Option<String>,
    pub poll_interval: Duration,
    /// Give up polling a job after this long. `None` polls until done.
    pub poll_deadline: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_deadline: None,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = Some(deadline);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolve the configured base URI.
    pub fn endpoint(&self) -> Result<Endpoint, RcompError> {
        Endpoint::resolve(self.base_uri.as_deref())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Catalog advertised by `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexListing {
    pub commands: BTreeMap<String, CommandDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub summary: String,
    /// Fields other than `summary` (`name`, `route`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `GET /version`. The shape is up to the server; rcomp servers
/// send `{"version": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionInfo(pub serde_json::Value);

impl VersionInfo {
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub argv: Vec<String>,
    /// Maximum duration of the remote job in seconds; 0 disables the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl InvocationRequest {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }
}

/// Reply to `POST /<command>` and `GET /status/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(rename = "ec", default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stime: Option<String>,
}

/// Final outcome of a remote invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub id: Option<String>,
    pub output: String,
    pub exit_code: i32,
    pub status: Option<String>,
}

impl InvocationResult {
    /// Output with surrounding whitespace removed, `None` when that leaves nothing.
    pub fn trimmed_output(&self) -> Option<&str> {
        let trimmed = self.output.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Where a job stands after one response from the server.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Pending { id: String },
    Done(InvocationResult),
}

impl InvocationResponse {
    /// Classify the response, rejecting ones that fit neither state.
    pub fn into_state(self) -> Result<JobState, RcompError> {
        if self.done {
            self.into_result().map(JobState::Done)
        } else {
            let id = self.id.ok_or_else(|| {
                RcompError::from_decode_error("missing field `id`", "pending job response")
            })?;
            Ok(JobState::Pending { id })
        }
    }

    /// Final result of a response whose `done` flag is set.
    pub fn into_result(self) -> Result<InvocationResult, RcompError> {
        let exit_code = self.exit_code.ok_or_else(|| {
            RcompError::from_decode_error("missing field `ec`", "completed job response")
        })?;
        Ok(InvocationResult {
            id: self.id,
            output: self.output.unwrap_or_default(),
            exit_code,
            status: self.status,
        })
    }
}
