use async_trait::async_trait;

use crate::{domain::Timestamp, Result};

/// Port for the homework review API.
///
/// One call is one authenticated GET for submissions changed since `from_date`.
/// Implementations must not retry; the poll loop owns retry policy.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Returns the raw JSON payload. Transport, HTTP status and server-reported
    /// errors come back as `Connection`, `Request` and `Server` errors.
    async fn fetch(&self, from_date: Timestamp) -> Result<serde_json::Value>;
}
