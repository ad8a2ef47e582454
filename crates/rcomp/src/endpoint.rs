//! Resolution of the server endpoint that requests are sent to.

use crate::error::RcompError;
use std::fmt;
use url::Url;

pub const DEFAULT_HOSTNAME: &str = "api.fmtools.org";
pub const DEFAULT_SECURE_PORT: u16 = 443;
pub const DEFAULT_PLAIN_PORT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Plain,
    Secure,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Plain => "http",
            Scheme::Secure => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Plain => DEFAULT_PLAIN_PORT,
            Scheme::Secure => DEFAULT_SECURE_PORT,
        }
    }
}

/// Where requests go: scheme, host and port of an rcomp server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub hostname: String,
    pub port: u16,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: Scheme::Secure,
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_SECURE_PORT,
        }
    }
}

impl Endpoint {
    /// Derive an endpoint from an optional base URI.
    ///
    /// Only an `http:` URI selects the plain scheme; every other scheme is
    /// treated as secure. A missing port falls back to 80 or 443 accordingly.
    /// Any path, query or fragment on the base URI is ignored.
    pub fn resolve(base_uri: Option<&str>) -> Result<Self, RcompError> {
        let Some(base_uri) = base_uri else {
            return Ok(Self::default());
        };

        let parsed = Url::parse(base_uri).map_err(|e| RcompError::MalformedEndpoint {
            uri: base_uri.to_string(),
            reason: e.to_string(),
        })?;

        let hostname = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return Err(RcompError::MalformedEndpoint {
                    uri: base_uri.to_string(),
                    reason: "missing host".to_string(),
                });
            }
        };

        let scheme = if parsed.scheme() == "http" {
            Scheme::Plain
        } else {
            Scheme::Secure
        };
        let port = parsed.port().unwrap_or_else(|| scheme.default_port());

        Ok(Self {
            scheme,
            hostname,
            port,
        })
    }

    /// Absolute URL whose path is `segments`, each percent-encoded as a
    /// single segment. No segments gives the root path.
    pub fn url(&self, segments: &[&str]) -> Result<Url, RcompError> {
        let malformed = |reason: String| RcompError::MalformedEndpoint {
            uri: self.to_string(),
            reason,
        };
        let mut url = Url::parse(&self.to_string()).map_err(|e| malformed(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| malformed("cannot carry a path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme.as_str(), self.hostname, self.port)
    }
}
