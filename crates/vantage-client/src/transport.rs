//! HTTP transport port.
//!
//! The [`HttpTransport`] trait is the injected seam between the client's
//! cache/retry state machines and the network. Production uses
//! [`ReqwestTransport`]; tests inject scripted fakes so retry counts and
//! cache hits are observable without a server.

use crate::error::TransportError;
use crate::upload::UploadSpec;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// One plain HTTP request, fully described.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,

    /// Absolute URL (base path already resolved).
    pub url: String,

    /// Query pairs, appended to the URL.
    pub query: Vec<(String, String)>,

    /// JSON body for mutating methods.
    pub body: Option<Value>,

    /// Bearer token attached as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,

    /// Per-request timeout budget.
    pub timeout: Duration,
}

/// The raw outcome of an executed request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP execution port.
///
/// Implementations must be `Send + Sync`; the client holds one behind a
/// `Box` for the lifetime of the page session.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes a plain request.
    ///
    /// A response is returned for *any* HTTP status; only transport-level
    /// failures (timeout, refused connection, reset) are errors.
    async fn execute(&self, spec: &RequestSpec) -> Result<TransportResponse, TransportError>;

    /// Executes a multipart file upload, reporting fractional progress
    /// through `spec.progress` as the body is transferred.
    async fn upload(&self, spec: UploadSpec) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, spec: &RequestSpec) -> Result<TransportResponse, TransportError> {
        let mut req = self
            .client
            .request(spec.method.clone(), &spec.url)
            .timeout(spec.timeout);

        if !spec.query.is_empty() {
            req = req.query(&spec.query);
        }
        if let Some(token) = &spec.bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        Ok(TransportResponse { status, body })
    }

    async fn upload(&self, spec: UploadSpec) -> Result<TransportResponse, TransportError> {
        let total = spec.bytes.len();
        let progress = spec.progress;

        // Chunk the payload so progress is reported as the body streams
        // out, not once at the end.
        const CHUNK_SIZE: usize = 64 * 1024;
        let mut sent = 0usize;
        let mut chunks: Vec<Result<Vec<u8>, std::io::Error>> = Vec::new();
        let mut fractions = Vec::new();
        for chunk in spec.bytes.chunks(CHUNK_SIZE) {
            sent += chunk.len();
            fractions.push(sent as f32 / total.max(1) as f32);
            chunks.push(Ok(chunk.to_vec()));
        }

        let reporting = progress.clone();
        let stream = futures::stream::iter(
            chunks
                .into_iter()
                .zip(fractions)
                .map(move |(chunk, fraction)| {
                    if let Some(cb) = &reporting {
                        cb(fraction);
                    }
                    chunk
                }),
        );

        let part = reqwest::multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(stream),
            total as u64,
        )
        .file_name(spec.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut req = self
            .client
            .post(&spec.url)
            .timeout(spec.timeout)
            .multipart(form);
        if let Some(token) = &spec.bearer {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        // An empty file streams no chunks; completion still means 100%.
        if total == 0 {
            if let Some(cb) = &progress {
                cb(1.0);
            }
        }

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(url: &str) -> RequestSpec {
        RequestSpec {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn response_success_predicate() {
        let ok = TransportResponse {
            status: 204,
            body: String::new(),
        };
        let not_found = TransportResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let transport = ReqwestTransport::new();
        // Port 1 is very unlikely to be open.
        let result = transport.execute(&spec("http://127.0.0.1:1/status")).await;

        assert!(matches!(
            result,
            Err(TransportError::Connect(_) | TransportError::Network(_))
        ));
    }

    #[tokio::test]
    async fn dns_failure_is_a_transport_error() {
        let transport = ReqwestTransport::new();
        let result = transport
            .execute(&spec("http://this-domain-does-not-exist-12345.invalid/x"))
            .await;

        assert!(result.is_err());
    }
}
