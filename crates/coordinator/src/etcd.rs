//! etcd v3 client over the JSON gateway (`/v3/kv/put`).

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::debug;

use crate::{BoxFuture, Coordinator, CoordinatorError};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:2379";

/// Body of a gateway `PutRequest`. Keys and values travel base64-encoded.
#[derive(Debug, Serialize)]
struct PutRequest {
    key: String,
    value: String,
}

impl PutRequest {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: STANDARD.encode(key),
            value: STANDARD.encode(value),
        }
    }
}

/// etcd client speaking the v3 JSON gateway.
pub struct EtcdClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EtcdClient {
    /// Creates a client for `endpoint` (e.g. `http://127.0.0.1:2379`).
    ///
    /// `request_timeout` bounds each request end to end.
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, CoordinatorError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), CoordinatorError> {
        let url = format!("{}/v3/kv/put", self.endpoint);
        let resp = self
            .http
            .post(&url)
            .json(&PutRequest::new(key, value))
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoordinatorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(key, "coordinator put succeeded");
        Ok(())
    }
}

impl Coordinator for EtcdClient {
    fn put<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> BoxFuture<'a, Result<(), CoordinatorError>> {
        Box::pin(self.put_value(key, value))
    }
}
