//! Caching, retrying HTTP client for the Vantage console runtime.
//!
//! Every feature panel talks to the backend through one [`ApiClient`]. The
//! client owns the concerns panels must not reimplement:
//!
//! - **Base path resolution** - the same client code works when the console
//!   is mounted under different deployment roots ([`BasePaths`]).
//! - **Response caching** - non-mutating requests are served from a
//!   TTL-bounded cache that short-circuits the network entirely.
//! - **Bounded retry** - transient failures are retried with a linearly
//!   increasing delay; terminal failures surface immediately.
//! - **Uploads** - a distinct multipart path with fractional progress
//!   callbacks.
//!
//! # Request Flow
//!
//! ```text
//! get("/users", params)
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                       ApiClient                         │
//! │  cache lookup ── hit within TTL ──► return cached value │
//! │      │ miss                                             │
//! │      ▼                                                  │
//! │  retry state machine (attempt 1..=3, delay × attempt)   │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ RequestSpec
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │              HttpTransport (port)                       │
//! │   ReqwestTransport (production) │ scripted fakes (test) │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport is an injected port, so the retry and cache state machines
//! are tested without a network.
//!
//! # Failure Classes
//!
//! Failures are explicit values inside the client ([`ApiError`],
//! [`TransportError`]); only the outward-facing methods raise them.
//!
//! | Class | Retried | Code |
//! |-------|---------|------|
//! | Transport (timeout, refused, reset) | Yes | `API_TRANSPORT` |
//! | HTTP 429 / 5xx | Yes | `API_STATUS` |
//! | Other non-2xx | No | `API_STATUS` |
//! | 2xx with unparsable body | No | `API_DECODE` |
//! | 2xx with `success: false` | No | `API_APPLICATION` |

mod base;
mod cache;
mod client;
mod envelope;
mod error;
mod transport;
mod upload;

pub use base::BasePaths;
pub use cache::{cache_key, ResponseCache};
pub use client::{ApiClient, ClientOptions, RequestOptions};
pub use envelope::{checked, Envelope, Preview, StatusCount};
pub use error::{ApiError, TransportError};
pub use transport::{HttpTransport, ReqwestTransport, RequestSpec, TransportResponse};
pub use upload::{ProgressFn, UploadSpec};

pub use reqwest::Method;
