// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP client for the console API.
//!
//! Every request goes through the [`CredentialTransport`]: it is decorated
//! with the bearer credential on the way out and its status is inspected on
//! the way back. Non-success bodies are parsed as `{ message, errorCode? }`.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, DashboardApi, LogsApi, RolesApi};
use crate::error::{ClientError, ClientResult, ErrorBody};
use crate::retry::RetryPolicy;
use crate::transport::CredentialTransport;

/// Request ID header attached to every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    transport: Arc<CredentialTransport>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client.
    pub fn new(config: ClientConfig, transport: CredentialTransport) -> ClientResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            transport: Arc::new(transport),
            retry: config.retry,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the transport.
    pub fn transport(&self) -> &CredentialTransport {
        &self.transport
    }

    /// Auth endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Role endpoints.
    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }

    /// Log endpoints.
    pub fn logs(&self) -> LogsApi<'_> {
        LogsApi::new(self)
    }

    /// Dashboard and KPI endpoints.
    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    /// Sends a GET. Transport failures are retried per the retry policy.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<T> {
        let mut retry = 0;
        loop {
            match self.send::<(), T>(Method::GET, path, query, None).await {
                Err(e) if e.is_retryable() => {
                    retry += 1;
                    match self.retry.delay_for(retry) {
                        Some(delay) => {
                            warn!(path, retry, delay_ms = delay.as_millis() as u64, error = %e, "Retrying request");
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(e),
                    }
                }
                other => return other,
            }
        }
    }

    /// Sends a POST with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// Sends a PUT with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4().to_string();
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(REQUEST_ID_HEADER, &request_id);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request = self.transport.decorate(request);

        debug!(%method, path, request_id = %request_id, "Sending request");
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();
        self.transport.on_response(status);

        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        debug!(%method, path, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(ClientError::from_status(status, ErrorBody::parse(&bytes)));
        }
        decode(path, status, &bytes)
    }
}

fn decode<T: DeserializeOwned>(path: &str, status: StatusCode, bytes: &[u8]) -> ClientResult<T> {
    // 204 and empty 200 bodies decode as `null`.
    let bytes = if bytes.is_empty() || status == StatusCode::NO_CONTENT {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| ClientError::decode(path, e))
}
