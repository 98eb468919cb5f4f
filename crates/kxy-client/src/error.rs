use thiserror::Error;

/// Shown when the backend rejects a call without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";
/// Shown when the transport fails without a message.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please login again.";

/// Failure reported by the HTTP layer: a non-2xx status, a refused
/// connection or an exceeded timeout.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn from_status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: format!("Request failed with status code {status}"),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn timeout(timeoutMs: u64) -> Self {
        Self::network(format!("timeout of {timeoutMs}ms exceeded"))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-zero envelope code.
    #[error("{msg}")]
    Application { code: Option<i64>, msg: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A success envelope whose `data` did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
    /// The outgoing request could not be built.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_unauthorized())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("too many redirects while resolving {0}")]
    RedirectLoop(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
