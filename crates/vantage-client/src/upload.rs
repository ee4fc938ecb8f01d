//! File upload types.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Fractional progress callback, invoked with values in `0.0..=1.0` as the
/// upload body is transferred.
pub type ProgressFn = Arc<dyn Fn(f32) + Send + Sync>;

/// One multipart file upload, fully described.
pub struct UploadSpec {
    /// Absolute URL (base path already resolved).
    pub url: String,

    /// File name reported in the multipart part.
    pub file_name: String,

    /// File content.
    pub bytes: Vec<u8>,

    /// Bearer token attached as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,

    /// Per-request timeout budget.
    pub timeout: Duration,

    /// Optional progress callback.
    pub progress: Option<ProgressFn>,
}

impl fmt::Debug for UploadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadSpec")
            .field("url", &self.url)
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("bearer", &self.bearer.is_some())
            .field("timeout", &self.timeout)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
