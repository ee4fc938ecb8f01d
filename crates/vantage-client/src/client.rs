//! ApiClient - the outward-facing request surface.

use crate::cache::{cache_key, ResponseCache};
use crate::error::{retryable_status, truncate_for_error};
use crate::upload::{ProgressFn, UploadSpec};
use crate::{ApiError, HttpTransport, RequestSpec, TransportResponse};
use parking_lot::RwLock;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum length of a body snippet quoted in an error message.
const ERROR_SNIPPET_LEN: usize = 200;

/// Client tuning knobs.
///
/// Defaults match the console's production behavior; tests shrink the
/// delays and TTL to keep the suite fast.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Total attempt budget per request (first try included).
    pub max_attempts: u32,

    /// Base inter-attempt delay; the actual delay is `base × attempt`.
    pub retry_base_delay: Duration,

    /// Response cache time-to-live.
    pub cache_ttl: Duration,

    /// Per-request timeout budget.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
            cache_ttl: Duration::from_secs(5 * 60),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Options for one request through [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,

    /// Query pairs.
    pub query: Vec<(String, String)>,

    /// JSON body for mutating methods.
    pub body: Option<Value>,

    /// Skip the cache even for a non-mutating request.
    pub bypass_cache: bool,
}

impl RequestOptions {
    /// A plain GET.
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            body: None,
            bypass_cache: false,
        }
    }

    /// A POST carrying a JSON body.
    #[must_use]
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            query: Vec::new(),
            body: Some(body),
            bypass_cache: false,
        }
    }

    /// A PUT carrying a JSON body.
    #[must_use]
    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            query: Vec::new(),
            body: Some(body),
            bypass_cache: false,
        }
    }

    /// A DELETE.
    #[must_use]
    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            query: Vec::new(),
            body: None,
            bypass_cache: false,
        }
    }

    /// Adds query pairs.
    #[must_use]
    pub fn with_query<I, K, V>(mut self, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(query.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Skips the cache for this request.
    #[must_use]
    pub fn bypass_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }
}

/// HTTP request execution with response caching and bounded retry.
///
/// See the [crate docs](crate) for the request flow. The client is
/// `Send + Sync` and shared behind an `Arc` across every feature module;
/// the cache map is owned exclusively by the client and mutated only
/// through its API.
pub struct ApiClient {
    transport: Box<dyn HttpTransport>,
    base: String,
    cache: ResponseCache,
    opts: ClientOptions,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client over a transport and a resolved base path.
    #[must_use]
    pub fn new(
        transport: Box<dyn HttpTransport>,
        base: impl Into<String>,
        opts: ClientOptions,
    ) -> Self {
        let cache = ResponseCache::new(opts.cache_ttl);
        Self {
            transport,
            base: base.into(),
            cache,
            opts,
            bearer: RwLock::new(None),
        }
    }

    /// Returns the resolved base path every request is issued under.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Sets or clears the bearer token attached to every request.
    pub fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write() = token;
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Issues a GET.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::get().with_query(params.iter().copied()))
            .await
    }

    /// Issues a POST with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::post(body)).await
    }

    /// Issues a PUT with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::put(body)).await
    }

    /// Issues a DELETE.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::delete()).await
    }

    /// Low-level request entry point.
    ///
    /// Non-mutating requests consult the cache first; a hit within the TTL
    /// short-circuits the network entirely. Transient failures (transport
    /// errors, HTTP 429/5xx) are retried up to the attempt budget with a
    /// linearly increasing delay; terminal failures surface immediately.
    /// The cache is populated only after a 2xx, JSON-parsable response.
    ///
    /// # Errors
    ///
    /// Returns the last [`ApiError`] once the attempt budget is exhausted,
    /// or immediately for terminal failures.
    pub async fn request(&self, path: &str, opts: RequestOptions) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base, path);
        let cacheable = opts.method == Method::GET && !opts.bypass_cache;
        let key = cache_key(&opts.method, &url, &opts.query);

        if cacheable {
            if let Some(value) = self.cache.get(&key) {
                debug!(%url, "served from response cache");
                return Ok(value);
            }
        }

        let spec = RequestSpec {
            method: opts.method,
            url,
            query: opts.query,
            body: opts.body,
            bearer: self.bearer.read().clone(),
            timeout: self.opts.timeout,
        };

        let max_attempts = self.opts.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let failure = match self.transport.execute(&spec).await {
                Ok(resp) if resp.is_success() => {
                    return match serde_json::from_str::<Value>(&resp.body) {
                        Ok(value) => {
                            if cacheable {
                                self.cache.put(key.clone(), value.clone());
                            }
                            Ok(value)
                        }
                        Err(err) => Err(ApiError::Decode(err.to_string())),
                    };
                }
                Ok(resp) => {
                    let err = status_error(&resp);
                    if !retryable_status(resp.status) {
                        return Err(err);
                    }
                    err
                }
                Err(err) => ApiError::Transport(err),
            };

            if attempt == max_attempts {
                return Err(failure);
            }

            let delay = self.opts.retry_base_delay * attempt;
            warn!(
                url = %spec.url,
                attempt,
                max = max_attempts,
                %failure,
                "request failed, retrying after {delay:?}"
            );
            tokio::time::sleep(delay).await;
        }

        // The loop always returns: success, terminal failure, or the
        // last-attempt branch above.
        unreachable!("retry loop exhausted without returning")
    }

    /// Uploads a file as multipart form data.
    ///
    /// Progress callbacks report fractions in `0.0..=1.0` during transfer.
    /// Resolves with the parsed response body (raw text wrapped as a JSON
    /// string when not parsable) on 2xx. Uploads are never cached and never
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upload`] on transport failure or any non-2xx
    /// status.
    pub async fn upload_file(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
        on_progress: Option<ProgressFn>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base, path);
        let spec = UploadSpec {
            url,
            file_name: file_name.to_string(),
            bytes,
            bearer: self.bearer.read().clone(),
            timeout: self.opts.timeout,
            progress: on_progress,
        };

        let resp = self
            .transport
            .upload(spec)
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        if !resp.is_success() {
            let detail = failure_detail(&resp.body)
                .unwrap_or_else(|| truncate_for_error(&resp.body, ERROR_SNIPPET_LEN).to_string());
            return Err(ApiError::Upload(format!("HTTP {}: {}", resp.status, detail)));
        }

        Ok(serde_json::from_str(&resp.body)
            .unwrap_or_else(|_| Value::String(resp.body.clone())))
    }
}

/// Builds the status error for a non-2xx response.
fn status_error(resp: &TransportResponse) -> ApiError {
    let detail = failure_detail(&resp.body)
        .unwrap_or_else(|| truncate_for_error(&resp.body, ERROR_SNIPPET_LEN).to_string());
    ApiError::Status {
        status: resp.status,
        detail,
    }
}

/// Extracts the failure description from an error body.
///
/// Failure responses carry either `detail` (HTTP-error style) or `error`
/// (application-level); both are checked.
fn failure_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["detail"]
        .as_str()
        .or_else(|| value["error"].as_str())
        .map(str::to_string)
}
