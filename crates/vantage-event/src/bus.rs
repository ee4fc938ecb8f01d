//! EventBus - priority-ordered publish/subscribe mediator.

use crate::listener::{Callback, Listener};
use crate::{AsyncCallback, EventError, ListenerId, Settled, SubscribeOpts, SyncCallback};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// In-process publish/subscribe mediator.
///
/// See the [crate docs](crate) for the dispatch model and ordering
/// guarantees. The bus is `Send + Sync`; shared via `Arc` across the
/// runtime and every feature module.
///
/// # Example
///
/// ```
/// use vantage_event::EventBus;
/// use serde_json::Value;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let bus = EventBus::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&hits);
/// bus.subscribe("data:refreshed", Arc::new(move |_payload: &Value| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// }));
///
/// bus.emit("data:refreshed", &serde_json::json!({ "source": "users" }));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct EventBus {
    registry: Mutex<Registry>,
}

#[derive(Default)]
struct Registry {
    topics: HashMap<String, Vec<Listener>>,
    next_id: u64,
}

impl Registry {
    /// Inserts keeping the topic vector sorted by descending priority,
    /// ties broken by insertion order.
    fn insert(&mut self, event: &str, callback: Callback, opts: SubscribeOpts) -> ListenerId {
        self.next_id += 1;

        let listener = Listener {
            id: ListenerId(self.next_id),
            callback,
            once: opts.once,
            priority: opts.priority,
        };

        let id = listener.id;
        let topic = self.topics.entry(event.to_string()).or_default();
        let pos = topic.partition_point(|l| l.priority >= opts.priority);
        topic.insert(pos, listener);
        id
    }

    /// Snapshots the dispatch list for one topic, in priority order.
    ///
    /// `once` listeners are removed from the live registry here, before
    /// invocation, so they can never be delivered a second time - not even
    /// by a re-entrant emission triggered from inside their own callback.
    fn snapshot(&mut self, event: &str) -> Vec<(ListenerId, Callback)> {
        let Some(topic) = self.topics.get_mut(event) else {
            return Vec::new();
        };

        let snapshot = topic
            .iter()
            .map(|l| (l.id, l.callback.clone()))
            .collect::<Vec<_>>();

        topic.retain(|l| !l.once);
        if topic.is_empty() {
            self.topics.remove(event);
        }

        snapshot
    }
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Subscribes a synchronous listener with default options.
    pub fn subscribe(&self, event: &str, callback: SyncCallback) -> ListenerId {
        self.subscribe_with(event, callback, SubscribeOpts::default())
    }

    /// Subscribes a synchronous listener.
    ///
    /// Returns a [`ListenerId`] for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe_with(
        &self,
        event: &str,
        callback: SyncCallback,
        opts: SubscribeOpts,
    ) -> ListenerId {
        let id = self
            .registry
            .lock()
            .insert(event, Callback::Sync(callback), opts);
        debug!(event, %id, priority = opts.priority, once = opts.once, "listener subscribed");
        id
    }

    /// Subscribes an asynchronous listener.
    ///
    /// During [`emit`](Self::emit) the produced future is spawned onto the
    /// current tokio runtime (dispatch begins in priority order, completion
    /// is unobserved). During [`emit_async`](Self::emit_async) it is awaited
    /// as part of the settled aggregate.
    pub fn subscribe_async(
        &self,
        event: &str,
        callback: AsyncCallback,
        opts: SubscribeOpts,
    ) -> ListenerId {
        let id = self
            .registry
            .lock()
            .insert(event, Callback::Async(callback), opts);
        debug!(event, %id, priority = opts.priority, once = opts.once, "async listener subscribed");
        id
    }

    /// Removes one listener from one topic.
    ///
    /// Returns `false` if the listener was not registered (already removed,
    /// fired as `once`, or never existed).
    pub fn unsubscribe(&self, event: &str, id: ListenerId) -> bool {
        let mut registry = self.registry.lock();
        let Some(topic) = registry.topics.get_mut(event) else {
            return false;
        };

        let before = topic.len();
        topic.retain(|l| l.id != id);
        let removed = topic.len() != before;
        if topic.is_empty() {
            registry.topics.remove(event);
        }
        removed
    }

    /// Removes every listener for `event`, or every listener on the bus
    /// when `event` is `None`.
    pub fn remove_all(&self, event: Option<&str>) {
        let mut registry = self.registry.lock();
        match event {
            Some(event) => {
                registry.topics.remove(event);
            }
            None => registry.topics.clear(),
        }
    }

    /// Returns the number of live listeners for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry
            .lock()
            .topics
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Returns the topics that currently have listeners.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.registry.lock().topics.keys().cloned().collect()
    }

    /// Synchronous fan-out.
    ///
    /// Invokes listeners strictly in priority order. Sync callbacks run
    /// inline; a failing callback is logged and does not stop subsequent
    /// listeners. Async callbacks are spawned onto the current tokio
    /// runtime and their completion is not awaited.
    ///
    /// Returns the number of listeners dispatched to.
    pub fn emit(&self, event: &str, payload: &Value) -> usize {
        let snapshot = self.registry.lock().snapshot(event);
        let mut delivered = 0;

        for (id, callback) in snapshot {
            match callback {
                Callback::Sync(cb) => {
                    if let Err(err) = cb(payload) {
                        warn!(event, listener = %id, %err, "listener failed during emit");
                    }
                    delivered += 1;
                }
                Callback::Async(cb) => {
                    if tokio::runtime::Handle::try_current().is_ok() {
                        let event = event.to_string();
                        let fut = cb(payload.clone());
                        tokio::spawn(async move {
                            if let Err(err) = fut.await {
                                warn!(event, listener = %id, %err, "async listener failed");
                            }
                        });
                        delivered += 1;
                    } else {
                        warn!(event, listener = %id, "async listener skipped: {}", EventError::NoRuntime);
                    }
                }
            }
        }

        delivered
    }

    /// Concurrent fan-out awaiting every listener's outcome.
    ///
    /// Dispatches to a snapshot of the listener list taken at call time, so
    /// listeners added during dispatch do not receive this round. All
    /// handlers run concurrently; the returned vector holds one [`Settled`]
    /// per listener in priority order - a failing handler never suppresses
    /// the results of the others.
    pub async fn emit_async(&self, event: &str, payload: Value) -> Vec<Settled> {
        let snapshot = self.registry.lock().snapshot(event);

        let futures = snapshot
            .into_iter()
            .map(|(id, callback)| {
                let payload = payload.clone();
                async move {
                    let result = match callback {
                        Callback::Sync(cb) => cb(&payload),
                        Callback::Async(cb) => cb(payload).await,
                    };
                    Settled {
                        listener: id,
                        result,
                    }
                }
            })
            .collect::<Vec<_>>();

        let settled = futures::future::join_all(futures).await;

        for outcome in settled.iter().filter(|s| !s.is_fulfilled()) {
            warn!(
                event,
                listener = %outcome.listener,
                "listener failed during emit_async"
            );
        }

        settled
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn recording_listener(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> SyncCallback {
        let log = Arc::clone(log);
        Arc::new(move |_payload: &Value| {
            log.lock().push(tag);
            Ok(())
        })
    }

    #[test]
    fn emit_to_empty_topic_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.emit("nothing", &Value::Null), 0);
    }

    #[test]
    fn emit_runs_in_descending_priority_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.subscribe_with(
            "boot",
            recording_listener(&log, "low"),
            SubscribeOpts::default().with_priority(-5),
        );
        bus.subscribe_with(
            "boot",
            recording_listener(&log, "high"),
            SubscribeOpts::default().with_priority(10),
        );
        bus.subscribe_with(
            "boot",
            recording_listener(&log, "mid"),
            SubscribeOpts::default().with_priority(3),
        );

        assert_eq!(bus.emit("boot", &Value::Null), 3);
        assert_eq!(*log.lock(), vec!["high", "mid", "low"]);
    }

    #[test]
    fn equal_priorities_preserve_insertion_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.subscribe("tick", recording_listener(&log, "first"));
        bus.subscribe("tick", recording_listener(&log, "second"));
        bus.subscribe("tick", recording_listener(&log, "third"));

        bus.emit("tick", &Value::Null);
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_listener_does_not_stop_siblings() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        bus.subscribe_with(
            "save",
            Arc::new(|_: &Value| Err(EventError::handler("broken"))),
            SubscribeOpts::default().with_priority(10),
        );
        let counter = Arc::clone(&hits);
        bus.subscribe(
            "save",
            Arc::new(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        assert_eq!(bus.emit("save", &Value::Null), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn once_listener_fires_exactly_once() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        bus.subscribe_with(
            "ping",
            Arc::new(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            SubscribeOpts::default().once(),
        );

        bus.emit("ping", &Value::Null);
        bus.emit("ping", &Value::Null);
        bus.emit("ping", &Value::Null);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count("ping"), 0);
    }

    #[tokio::test]
    async fn once_listener_fires_exactly_once_via_emit_async() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        bus.subscribe_with(
            "ping",
            Arc::new(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            SubscribeOpts::default().once(),
        );

        bus.emit_async("ping", Value::Null).await;
        bus.emit_async("ping", Value::Null).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let id = bus.subscribe(
            "tick",
            Arc::new(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        assert!(bus.unsubscribe("tick", id));
        assert!(!bus.unsubscribe("tick", id));
        bus.emit("tick", &Value::Null);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remove_all_scoped_and_global() {
        let bus = EventBus::new();
        bus.subscribe("a", Arc::new(|_: &Value| Ok(())));
        bus.subscribe("a", Arc::new(|_: &Value| Ok(())));
        bus.subscribe("b", Arc::new(|_: &Value| Ok(())));

        bus.remove_all(Some("a"));
        assert_eq!(bus.listener_count("a"), 0);
        assert_eq!(bus.listener_count("b"), 1);

        bus.remove_all(None);
        assert!(bus.event_names().is_empty());
    }

    #[test]
    fn event_names_lists_live_topics() {
        let bus = EventBus::new();
        bus.subscribe("auth:login", Arc::new(|_: &Value| Ok(())));
        bus.subscribe("theme:changed", Arc::new(|_: &Value| Ok(())));

        let mut names = bus.event_names();
        names.sort();
        assert_eq!(names, vec!["auth:login", "theme:changed"]);
    }

    #[test]
    fn reentrant_emit_does_not_deadlock() {
        let bus = Arc::new(EventBus::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_bus = Arc::clone(&bus);
        let counter = Arc::clone(&hits);
        bus.subscribe(
            "outer",
            Arc::new(move |_: &Value| {
                inner_bus.emit("inner", &Value::Null);
                Ok(())
            }),
        );
        bus.subscribe(
            "inner",
            Arc::new(move |_: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        bus.emit("outer", &Value::Null);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscription_during_dispatch_affects_future_rounds_only() {
        let bus = Arc::new(EventBus::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_bus = Arc::clone(&bus);
        let counter = Arc::clone(&hits);
        bus.subscribe(
            "load",
            Arc::new(move |_: &Value| {
                let late_counter = Arc::clone(&counter);
                inner_bus.subscribe(
                    "load",
                    Arc::new(move |_: &Value| {
                        late_counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
                );
                Ok(())
            }),
        );

        // First round: only the original listener; the late one misses it.
        assert_eq!(bus.emit("load", &Value::Null), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        // Second round: original + one late listener (which adds another).
        assert_eq!(bus.emit("load", &Value::Null), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn emit_async_settles_every_listener() {
        let bus = EventBus::new();

        bus.subscribe_with(
            "verify",
            Arc::new(|_: &Value| Ok(())),
            SubscribeOpts::default().with_priority(5),
        );
        bus.subscribe("verify", Arc::new(|_: &Value| Err(EventError::handler("bad"))));
        bus.subscribe_async(
            "verify",
            Arc::new(|_payload: Value| Box::pin(async { Ok(()) })),
            SubscribeOpts::default().with_priority(-1),
        );

        let settled = bus.emit_async("verify", Value::Null).await;

        assert_eq!(settled.len(), 3);
        assert!(settled[0].is_fulfilled());
        assert!(!settled[1].is_fulfilled());
        assert!(settled[2].is_fulfilled());
    }

    #[tokio::test]
    async fn emit_async_snapshot_excludes_late_subscribers() {
        let bus = Arc::new(EventBus::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_bus = Arc::clone(&bus);
        let counter = Arc::clone(&hits);
        bus.subscribe(
            "round",
            Arc::new(move |_: &Value| {
                let late_counter = Arc::clone(&counter);
                inner_bus.subscribe(
                    "round",
                    Arc::new(move |_: &Value| {
                        late_counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
                );
                Ok(())
            }),
        );

        let first = bus.emit_async("round", Value::Null).await;
        assert_eq!(first.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let second = bus.emit_async("round", Value::Null).await;
        assert_eq!(second.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn emit_spawns_async_listeners() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        bus.subscribe_async(
            "bg",
            Arc::new(move |_payload: Value| {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            }),
            SubscribeOpts::default(),
        );

        assert_eq!(bus.emit("bg", &Value::Null), 1);
        tokio::task::yield_now().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn payload_reaches_listeners() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Value::Null));

        let sink = Arc::clone(&seen);
        bus.subscribe(
            "auth:login",
            Arc::new(move |payload| {
                *sink.lock() = payload.clone();
                Ok(())
            }),
        );

        bus.emit("auth:login", &serde_json::json!({ "username": "analyst" }));
        assert_eq!(seen.lock()["username"], "analyst");
    }
}
