//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vantage_client::{
    HttpTransport, RequestSpec, TransportError, TransportResponse, UploadSpec,
};
use vantage_runtime::{AppContext, RuntimeConfig};
use vantage_runtime::testing::RecordingShell;
use vantage_store::MemoryBackend;

/// Scripted transport: pops one canned outcome per call and records every
/// request spec it sees.
#[derive(Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<RequestSpec>>,
}

impl FakeTransport {
    pub fn scripted<I>(outcomes: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Result<TransportResponse, TransportError>>,
    {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().iter().map(|s| s.url.clone()).collect()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, spec: &RequestSpec) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(spec.clone());
        self.outcomes.lock().pop_front().unwrap_or_else(|| ok("{}"))
    }

    async fn upload(&self, _spec: UploadSpec) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| ok(r#"{"success": true}"#))
    }
}

/// Arc wrapper so tests keep a handle on the fake after handing it in.
pub struct SharedTransport(pub Arc<FakeTransport>);

#[async_trait]
impl HttpTransport for SharedTransport {
    async fn execute(&self, spec: &RequestSpec) -> Result<TransportResponse, TransportError> {
        self.0.execute(spec).await
    }

    async fn upload(&self, spec: UploadSpec) -> Result<TransportResponse, TransportError> {
        self.0.upload(spec).await
    }
}

pub fn ok(body: &str) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status: 200,
        body: body.into(),
    })
}

pub fn status(code: u16, body: &str) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status: code,
        body: body.into(),
    })
}

pub fn network() -> Result<TransportResponse, TransportError> {
    Err(TransportError::Network("connection reset".into()))
}

/// Config with shrunken delays so failing paths stay fast.
pub fn fast_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.api.retry_base_delay_ms = 1;
    config.api.timeout_secs = 1;
    config
}

/// Builds a context over a seeded in-memory backend, a scripted transport,
/// and a recording shell.
pub fn test_context(
    seeded: &[(&str, &str)],
    transport: Arc<FakeTransport>,
) -> (Arc<AppContext>, Arc<RecordingShell>) {
    let backend = MemoryBackend::with_records(seeded.iter().copied());
    let shell = Arc::new(RecordingShell::new());

    let ctx = AppContext::builder(fast_config())
        .with_backend(Box::new(backend))
        .with_transport(Box::new(SharedTransport(transport)))
        .with_shell(Arc::clone(&shell) as Arc<dyn vantage_runtime::ShellPort>)
        .build()
        .expect("context build");

    (Arc::new(ctx), shell)
}

/// A verification body for a user envelope.
pub fn verified_user_body(username: &str, is_admin: bool) -> String {
    serde_json::json!({
        "user": { "id": 1, "username": username, "is_admin": is_admin, "roles": [] }
    })
    .to_string()
}
