//! Feature module contract for the Vantage console runtime.
//!
//! A feature panel (user administration, vulnerability records, exploit
//! databases, settings) participates in the runtime by implementing
//! [`Module`] and registering a [`ModuleProvider`] under its capability
//! name. The orchestrator resolves providers by key and fails fast with a
//! typed missing-capability error when a required panel is absent - no
//! duck-typed global lookups, no partially wired UI.
//!
//! # Boot Contract
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     ModuleRegistry                      │
//! │   "notifications" → provider                            │
//! │   "users"         → provider                            │
//! │   "vulnerabilities" → provider        (typed DI keys)   │
//! └──────────────┬──────────────────────────────────────────┘
//!                │ verify(REQUIRED)  - abort on any miss
//!                │ build(capability, services)
//!                ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   Box<dyn Module>  - refresh_status / follow_up hooks   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Beyond construction, the orchestrator relies only on the *optional*
//! [`Module::refresh_status`] hook (run concurrently at startup) and the
//! optional [`Module::follow_up`] hook (run sequentially afterwards).
//!
//! # Panel Surface
//!
//! Shared list-panel behavior is expressed through the [`TableModel`]
//! interface plus free functions ([`build_rows`]) rather than a base class
//! panels must subclass.

mod error;
mod module;
mod registry;
mod table;

pub use error::ModuleError;
pub use module::{Module, ModuleDescriptor, ModuleServices};
pub use registry::{ModuleProvider, ModuleRegistry};
pub use table::{build_rows, TableModel};
