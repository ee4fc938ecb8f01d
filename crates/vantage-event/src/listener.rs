//! Listener records and subscription options.

use crate::EventError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Synchronous listener callback.
///
/// Invoked inline by [`EventBus::emit`](crate::EventBus::emit) and inside
/// the aggregation future by
/// [`EventBus::emit_async`](crate::EventBus::emit_async).
pub type SyncCallback = Arc<dyn Fn(&Value) -> Result<(), EventError> + Send + Sync>;

/// Asynchronous listener callback.
///
/// Receives an owned payload clone because the produced future may outlive
/// the emit call.
pub type AsyncCallback =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<(), EventError>> + Send + Sync>;

/// Handle identifying one subscription on one topic.
///
/// Returned by the subscribe methods and consumed by
/// [`EventBus::unsubscribe`](crate::EventBus::unsubscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Subscription options.
///
/// # Example
///
/// ```
/// use vantage_event::SubscribeOpts;
///
/// let opts = SubscribeOpts::default().with_priority(10).once();
/// assert!(opts.once);
/// assert_eq!(opts.priority, 10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeOpts {
    /// Remove the listener after its first delivery.
    pub once: bool,

    /// Invocation priority. Higher values run first; equal priorities
    /// preserve insertion order.
    pub priority: i32,
}

impl SubscribeOpts {
    /// Marks the subscription as single-shot.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Sets the invocation priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// The callback flavor held by a listener record.
#[derive(Clone)]
pub(crate) enum Callback {
    Sync(SyncCallback),
    Async(AsyncCallback),
}

/// One registered listener.
///
/// Ties between equal priorities are broken by position: new listeners are
/// inserted after every existing listener of the same priority, so the
/// per-topic vector is always sorted by (priority desc, insertion order).
pub(crate) struct Listener {
    pub id: ListenerId,
    pub callback: Callback,
    pub once: bool,
    pub priority: i32,
}

/// Outcome of one listener during [`emit_async`](crate::EventBus::emit_async).
///
/// A failing handler never suppresses the outcomes of its siblings; the
/// aggregate resolves with exactly one `Settled` per dispatched listener,
/// in listener (priority) order.
#[derive(Debug)]
pub struct Settled {
    /// The listener this outcome belongs to.
    pub listener: ListenerId,

    /// The handler's result.
    pub result: Result<(), EventError>,
}

impl Settled {
    /// Returns `true` if the handler completed without error.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.result.is_ok()
    }
}
