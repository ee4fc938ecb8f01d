//! Namespaced persistent key/value storage for the Vantage console runtime.
//!
//! The console persists small bits of state across page loads: the session
//! token, the verified user record, the theme preference, the sidebar state,
//! list paging. All of it flows through one [`StorageAdapter`] over a
//! pluggable [`StorageBackend`] port.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │          callers (session manager, panels)           │
//! │   get("theme", default) / set("theme", &"dark")      │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ logical keys, typed values
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                   StorageAdapter                     │
//! │   - prefixes every key with "vantage."               │
//! │   - JSON (de)serialization, raw-string fallback      │
//! │   - catches backend failures, degrades to defaults   │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ raw string records
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │             StorageBackend (port)                    │
//! │     FileBackend (durable)  │  MemoryBackend (test)   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Namespace
//!
//! Every logical key is transparently prefixed with [`NAMESPACE`] so that
//! independently deployed front-ends sharing one storage origin never
//! collide. Callers never see the prefix; [`StorageAdapter::clear`] and
//! [`StorageAdapter::keys`] operate on the namespace only.
//!
//! # Failure Policy
//!
//! Storage failures (quota, disabled storage, serialization) are caught at
//! the adapter boundary, logged, and surfaced as a boolean failure or the
//! caller's default value. They are never propagated as errors - a console
//! with broken persistence still runs.

mod adapter;
mod backend;
mod error;
mod file;

pub use adapter::{StorageAdapter, NAMESPACE};
pub use backend::{MemoryBackend, StorageBackend};
pub use error::StorageError;
pub use file::{default_storage_path, FileBackend};
