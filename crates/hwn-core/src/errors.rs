use std::fmt;

/// Identifies a review API request in diagnostics.
///
/// Deliberately excludes the auth header: errors end up in chat messages and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestParams {
    pub endpoint: String,
    pub from_date: i64,
}

impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {} from_date={}", self.endpoint, self.from_date)
    }
}

/// Core error type.
///
/// Adapter crates map their library errors into this type so the poll loop can
/// tell fatal failures (config) from ones it reports and skips.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("connection error: {reason} ({params})")]
    Connection { params: RequestParams, reason: String },

    #[error("unexpected api status {status} ({params})")]
    Request { status: u16, params: RequestParams },

    #[error("server error: {field} = {value} ({params})")]
    Server {
        field: String,
        value: String,
        params: RequestParams,
    },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("delivery error: {0}")]
    Delivery(String),
}

impl Error {
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::Schema(reason.into())
    }

    /// Short label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Connection { .. } => "connection",
            Error::Request { .. } => "request",
            Error::Server { .. } => "server",
            Error::Schema(_) => "schema",
            Error::Delivery(_) => "delivery",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
