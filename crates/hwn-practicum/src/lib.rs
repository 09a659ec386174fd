//! Review API adapter (Yandex Practicum `homework_statuses`).
//!
//! Implements the `hwn-core` ReviewApi port over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde_json::Value;

use hwn_core::{
    domain::Timestamp,
    errors::{Error, RequestParams},
    ports::ReviewApi,
    Result,
};

/// Payload keys the server uses to reject a request with HTTP 200.
const SERVER_ERROR_FIELDS: [&str; 2] = ["code", "error"];

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("review api client build failed: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch(&self, from_date: Timestamp) -> Result<Value> {
        let params = RequestParams {
            endpoint: self.endpoint.clone(),
            from_date,
        };
        tracing::debug!("requesting {params}");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| Error::Connection {
                params: params.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::Request {
                status: status.as_u16(),
                params,
            });
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| Error::Schema(format!("response body is not json: {e}")))?;

        check_server_error(data, params)
    }
}

fn check_server_error(data: Value, params: RequestParams) -> Result<Value> {
    for field in SERVER_ERROR_FIELDS {
        if let Some(value) = data.get(field) {
            return Err(Error::Server {
                field: field.to_string(),
                value: value.to_string(),
                params,
            });
        }
    }
    Ok(data)
}
