//! Event bus for the Vantage console runtime.
//!
//! The [`EventBus`] is the in-process mediator that carries cross-module
//! notifications (login, logout, theme changes, data refreshes) for the
//! lifetime of a page session. Feature panels subscribe to topics and never
//! hold references to each other.
//!
//! # Dispatch Model
//!
//! ```text
//! ┌──────────────┐ emit("auth:login", user)  ┌───────────────────────────┐
//! │   Session    │ ────────────────────────► │         EventBus          │
//! │   Manager    │                           │  registry: topic → sorted │
//! └──────────────┘                           │  listeners (priority desc)│
//!                                            └─────────────┬─────────────┘
//!                            priority order, one at a time │
//!                  ┌──────────────┬────────────────────────┤
//!                  ▼              ▼                        ▼
//!           ┌────────────┐ ┌────────────┐          ┌────────────┐
//!           │ users panel│ │ vuln panel │          │ settings   │
//!           └────────────┘ └────────────┘          └────────────┘
//! ```
//!
//! Two dispatch flavors:
//!
//! - [`EventBus::emit`] - synchronous fan-out in strict priority order.
//!   A failing listener is logged and never stops its siblings.
//! - [`EventBus::emit_async`] - concurrent fan-out over a snapshot of the
//!   listener list; resolves once every listener's outcome - success or
//!   failure - is known, as one [`Settled`] record per listener.
//!
//! # Ordering Guarantees
//!
//! Within one topic, listeners are always stored sorted by descending
//! priority, ties broken by insertion order. `emit` delivers fully
//! synchronously in that order; `emit_async` only guarantees that dispatch
//! *begins* in that order - completion order is up to each handler.
//!
//! # Re-entrancy
//!
//! The registry lock is never held across a callback invocation, so a
//! listener may freely subscribe, unsubscribe, or emit (including the same
//! topic) without deadlock. Registry mutation during dispatch affects
//! future emissions only.
//!
//! # Error Handling
//!
//! Listener failures are isolated per listener and carried as
//! [`EventError`], which implements [`vantage_types::ErrorCode`]:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::Handler`] | `EVENT_HANDLER_FAILED` | No |
//! | [`EventError::NoRuntime`] | `EVENT_NO_RUNTIME` | No |

mod bus;
mod error;
mod listener;

pub use bus::EventBus;
pub use error::EventError;
pub use listener::{AsyncCallback, ListenerId, Settled, SubscribeOpts, SyncCallback};

// Re-export the topic name constants for convenience.
pub use vantage_types::events as topics;
