//! Application runtime for the Vantage console.
//!
//! This crate assembles the leaf services into the running application:
//!
//! - [`AppContext`] - the explicit context object constructed once at the
//!   entry point and passed by reference to every component. There is no
//!   ambient global; everything reaches shared services through it.
//! - [`SessionManager`] - the `NoToken → Pending → {Verified, Rejected}`
//!   session lifecycle over storage, client, and bus.
//! - [`Orchestrator`] - the fail-stop boot sequence: capability check →
//!   module construction → session verification → UI bootstrap → initial
//!   data load.
//! - [`RuntimeConfig`] - layered configuration (defaults → TOML file →
//!   `VANTAGE_*` environment variables).
//!
//! # Boot Sequence
//!
//! ```text
//! AppContext::builder(config).with_shell(...).build()
//!     │  constructs bus / store / client / session,
//!     │  migrates legacy storage keys once
//!     ▼
//! Orchestrator::new(ctx, registry).init().await
//!     │
//!     ├─ 1. capability check        ── missing? abort, nothing constructed
//!     ├─ 2. construct modules       ── notifications first, then the rest
//!     ├─ 3. session verification    ── NoToken/Rejected? redirect + stop
//!     ├─ 4. UI bootstrap            ── theme, sidebar, initial panel
//!     └─ 5. initial data load       ── refresh hooks concurrently,
//!                                      follow-up hooks sequentially;
//!                                      failures notify, never abort
//! ```
//!
//! Only authentication failure and a missing required capability are
//! fatal. Every other failure degrades to a notification plus continued
//! operation.

mod config;
mod context;
mod error;
mod orchestrator;
mod session;
mod shell;

pub mod testing;

pub use config::{ApiConfig, ConfigError, ConfigLoader, RuntimeConfig, StorageConfig, UiConfig};
pub use context::{AppContext, AppContextBuilder};
pub use error::RuntimeError;
pub use orchestrator::Orchestrator;
pub use session::{AuthState, SessionManager, SETTINGS_PATH, VERIFY_PATH};
pub use shell::ShellPort;
