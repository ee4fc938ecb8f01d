//! Shared types for the Vantage console runtime.
//!
//! This crate is the bottom of the dependency stack. Every other
//! `vantage-*` crate depends on it for:
//!
//! - [`ErrorCode`] - unified error code interface
//! - [`UserRecord`] - the verified user envelope persisted by the session layer
//! - [`PaginationState`] - list-panel paging state persisted across loads
//! - [`capability`] - the fixed required-capability names
//! - [`events`] - well-known event bus topic names
//! - [`keys`] - logical storage key names
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 vantage-runtime                     │
//! │        (AppContext, SessionManager, Orchestrator)   │
//! ├────────────┬────────────┬────────────┬──────────────┤
//! │ vantage-   │ vantage-   │ vantage-   │ vantage-     │
//! │ event      │ store      │ client     │ module       │
//! ├────────────┴────────────┴────────────┴──────────────┤
//! │              vantage-types  ◄── HERE                │
//! └─────────────────────────────────────────────────────┘
//! ```

mod error;
mod pagination;
mod user;

pub mod capability;
pub mod events;
pub mod keys;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use pagination::PaginationState;
pub use user::{UserRecord, ROLE_ADMIN};
