use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SocketConfig;
use crate::error::{Error, Result};
use crate::types::MatchEvent;
use crate::websocket::client::{FeedWsClient, WireMessage, WireSink};
use crate::websocket::retry::RetryPolicy;

/// Connection lifecycle state surfaced to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
        }
    }
}

/// Detach handle returned by the subscribe methods.
///
/// Call [`detach`](Subscription::detach) to stop receiving notifications.
/// Dropping the handle without detaching leaves the subscriber attached for
/// the lifetime of the manager.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Remove this subscriber from its feed
    pub fn detach(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Observer list with per-subscription removal and per-callback isolation.
struct SubscriberList<T> {
    entries: Mutex<HashMap<u64, Callback<T>>>,
    next_id: AtomicU64,
}

impl<T: 'static> SubscriberList<T> {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        })
    }

    fn add(self: &Arc<Self>, callback: Callback<T>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).insert(id, callback);

        let list = Arc::clone(self);
        Subscription {
            detach: Some(Box::new(move || {
                lock(&list.entries).remove(&id);
            })),
        }
    }

    /// Invoke every subscriber. A panicking callback is contained and never
    /// prevents delivery to the others.
    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.entries).values().cloned().collect();
        for callback in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(value))).is_err() {
                warn!("subscriber callback panicked; other subscribers unaffected");
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner of the single persistent feed connection.
///
/// State machine `Disconnected → Connecting → Connected`, dropping back to
/// `Disconnected` on any failure or explicit [`disconnect`]. Exposes three
/// independent notification feeds (match events, connection state, errors),
/// each supporting any number of subscribers with individual detach handles.
///
/// The manager never errors out of a running connection: transport failures
/// are surfaced as strings on the error feed and the bounded fixed-delay
/// reconnect policy from the socket configuration takes over. Once a
/// connection settles, the configured default match is joined automatically
/// after a short delay; that pending join is cancelled if the connection
/// drops first.
///
/// All methods are non-blocking; I/O runs on a spawned tokio task, and each
/// inbound event is delivered to subscribers to completion before the next
/// one is processed, preserving the order the server sent them.
///
/// [`disconnect`]: ConnectionManager::disconnect
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

/// Lifecycle state plus the session counter that guards it.
///
/// Every `connect()` and `disconnect()` bumps `session` under this lock, so
/// an aborted I/O task that was already past its last await point can tell
/// it is stale and must not touch the connection again.
struct SessionState {
    state: ConnectionState,
    session: u64,
}

struct Inner {
    config: SocketConfig,
    client: FeedWsClient,
    state: Mutex<SessionState>,
    events: Arc<SubscriberList<MatchEvent>>,
    states: Arc<SubscriberList<ConnectionState>>,
    errors: Arc<SubscriberList<String>>,
    outbound: Mutex<Option<mpsc::UnboundedSender<WireMessage>>>,
    io_task: Mutex<Option<JoinHandle<()>>>,
    join_task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionManager {
    /// Create a manager for the given socket configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration names no transport
    /// this client supports.
    pub fn new(config: SocketConfig) -> Result<Self> {
        let client = FeedWsClient::from_config(&config)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                client,
                state: Mutex::new(SessionState {
                    state: ConnectionState::Disconnected,
                    session: 0,
                }),
                events: SubscriberList::new(),
                states: SubscriberList::new(),
                errors: SubscriberList::new(),
                outbound: Mutex::new(None),
                io_task: Mutex::new(None),
                join_task: Mutex::new(None),
            }),
        })
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        lock(&self.inner.state).state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Open the feed connection.
    ///
    /// No-op unless currently `Disconnected`. Transitions to `Connecting`
    /// and spawns the I/O task; further transitions arrive on the state
    /// feed. Must be called from within a tokio runtime.
    pub fn connect(&self) {
        let session;
        {
            let mut guard = lock(&self.inner.state);
            if guard.state != ConnectionState::Disconnected {
                return;
            }
            guard.session += 1;
            session = guard.session;
            guard.state = ConnectionState::Connecting;
        }
        self.inner.states.notify(&ConnectionState::Connecting);

        let handle = tokio::spawn(run_io(Arc::clone(&self.inner), session));
        if let Some(old) = lock(&self.inner.io_task).replace(handle) {
            old.abort();
        }
    }

    /// Tear down the connection unconditionally, even mid-handshake.
    ///
    /// Cancels any pending automatic join and immediately reports
    /// `Disconnected`. Idempotent: a second call changes nothing and emits
    /// no duplicate state notification.
    pub fn disconnect(&self) {
        if let Some(handle) = lock(&self.inner.io_task).take() {
            handle.abort();
        }

        // Bump the session so an I/O task already past its last await point
        // cannot resurrect the connection after this call returns
        let changed;
        {
            let mut guard = lock(&self.inner.state);
            guard.session += 1;
            changed = guard.state != ConnectionState::Disconnected;
            guard.state = ConnectionState::Disconnected;
        }
        *lock(&self.inner.outbound) = None;
        self.inner.cancel_pending_join();
        if changed {
            self.inner.states.notify(&ConnectionState::Disconnected);
        }
    }

    /// Ask the server to stream events for a match. Silent no-op when not
    /// connected.
    pub fn join_match(&self, match_id: &str) {
        self.inner.emit(WireMessage::join_match(match_id));
    }

    /// Stop streaming events for a match. Silent no-op when not connected.
    pub fn leave_match(&self, match_id: &str) {
        self.inner.emit(WireMessage::leave_match(match_id));
    }

    /// Ask the server to replay every event since match start. The replayed
    /// events arrive on the ordinary event feed, in original order. Silent
    /// no-op when not connected.
    pub fn request_history(&self, match_id: &str) {
        self.inner.emit(WireMessage::get_match_history(match_id));
    }

    /// Subscribe to incoming match events, stamped with id and arrival time
    pub fn subscribe_events<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MatchEvent) + Send + Sync + 'static,
    {
        self.inner.events.add(Arc::new(callback))
    }

    /// Subscribe to connection state transitions
    pub fn subscribe_state<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ConnectionState) + Send + Sync + 'static,
    {
        self.inner.states.add(Arc::new(callback))
    }

    /// Subscribe to human-readable transport error notifications
    pub fn subscribe_errors<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.inner.errors.add(Arc::new(callback))
    }
}

impl Inner {
    /// Transition on behalf of the I/O task for `session`. Returns false
    /// without touching anything if the session is stale (a newer
    /// `connect()`/`disconnect()` has superseded it). Dedup: re-entering the
    /// current state notifies nobody. Leaving `Connected` cancels a pending
    /// automatic join.
    fn set_session_state(self: &Arc<Self>, session: u64, next: ConnectionState) -> bool {
        {
            let mut guard = lock(&self.state);
            if guard.session != session {
                return false;
            }
            if guard.state == next {
                return true;
            }
            guard.state = next;
        }
        if next != ConnectionState::Connected {
            self.cancel_pending_join();
        }
        self.states.notify(&next);
        true
    }

    /// Enter `Connected` and install the outbound channel, unless the
    /// session has been superseded. The outbound slot is assigned under the
    /// state lock so `disconnect()` can never observe `Disconnected` with a
    /// live sender.
    fn begin_connected(
        self: &Arc<Self>,
        session: u64,
        tx: mpsc::UnboundedSender<WireMessage>,
    ) -> bool {
        {
            let mut guard = lock(&self.state);
            if guard.session != session {
                return false;
            }
            guard.state = ConnectionState::Connected;
            *lock(&self.outbound) = Some(tx);
        }
        self.states.notify(&ConnectionState::Connected);
        true
    }

    /// Leave a dropped session: clear the outbound channel and report
    /// `Disconnected`, unless a newer session owns the connection now.
    fn end_connected(self: &Arc<Self>, session: u64) -> bool {
        {
            let mut guard = lock(&self.state);
            if guard.session != session {
                return false;
            }
            guard.state = ConnectionState::Disconnected;
            *lock(&self.outbound) = None;
        }
        self.cancel_pending_join();
        self.states.notify(&ConnectionState::Disconnected);
        true
    }

    fn session_is_current(&self, session: u64) -> bool {
        lock(&self.state).session == session
    }

    fn cancel_pending_join(&self) {
        if let Some(handle) = lock(&self.join_task).take() {
            handle.abort();
        }
    }

    fn emit(&self, msg: WireMessage) {
        let sender = lock(&self.outbound).clone();
        match sender {
            Some(tx) => {
                if let Err(err) = tx.send(msg) {
                    debug!(event = %err.0.event, "outbound channel closed; message dropped");
                }
            }
            None => debug!(event = %msg.event, "not connected; outbound message skipped"),
        }
    }

    /// Dispatch one inbound envelope by its message name.
    fn handle_wire(self: &Arc<Self>, envelope: WireMessage) {
        match envelope.event.as_str() {
            "match_event" | "ball_event" | "boundary_event" | "wicket_event"
            | "match_status_event" => self.deliver_raw(envelope.data),
            "match_history" => match serde_json::from_value::<HistoryPayload>(envelope.data) {
                Ok(history) => {
                    debug!(count = history.events.len(), "replaying match history");
                    for event in history.events {
                        self.deliver(event);
                    }
                }
                Err(e) => debug!(error = %e, "malformed match history; ignored"),
            },
            "connect_error" | "reconnect_error" => {
                let message = format!("Connection failed: {}", describe_error(&envelope.data));
                self.errors.notify(&message);
            }
            "error" => {
                let message = format!("Socket error: {}", describe_error(&envelope.data));
                self.errors.notify(&message);
            }
            // Lifecycle signals; connection state is tracked at the stream level
            "connect" | "disconnect" | "reconnect" => {
                debug!(event = %envelope.event, "transport lifecycle signal")
            }
            other => debug!(event = other, "unhandled wire message"),
        }
    }

    fn deliver_raw(self: &Arc<Self>, data: Value) {
        match serde_json::from_value::<MatchEvent>(data) {
            Ok(event) => self.deliver(event),
            Err(e) => debug!(error = %e, "malformed match event; ignored"),
        }
    }

    /// Stamp and fan out one event. Stamping happens here, at delivery time,
    /// so identity and timestamp are stable however often the consumer
    /// re-renders.
    fn deliver(&self, mut event: MatchEvent) {
        event.ensure_stamped();
        self.events.notify(&event);
    }
}

#[derive(Deserialize)]
struct HistoryPayload {
    #[serde(default)]
    events: Vec<MatchEvent>,
}

/// Human-readable description of whatever error shape the transport sent:
/// `message`, then `description`, then `type`, then the raw value.
fn describe_error(data: &Value) -> String {
    for key in ["message", "description", "type"] {
        if let Some(text) = data.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    match data {
        Value::String(text) => text.clone(),
        Value::Null => "unknown error".to_string(),
        other => other.to_string(),
    }
}

/// Connection loop: open, stream until the connection drops, then retry per
/// the bounded fixed-delay policy. Every state transition is guarded by the
/// session counter: once `disconnect()` (or a newer `connect()`) supersedes
/// this task, it backs out without touching the manager again.
async fn run_io(inner: Arc<Inner>, session: u64) {
    let retry = RetryPolicy::from_config(&inner.config);
    let mut delays = retry.delays();

    loop {
        match inner.client.open().await {
            Ok((sink, stream)) => {
                // Fresh retry budget once a connection is established
                delays = retry.delays();

                let (tx, rx) = mpsc::unbounded_channel();
                if !inner.begin_connected(session, tx) {
                    return;
                }
                let writer = tokio::spawn(pump_outbound(sink, rx));

                schedule_auto_join(&inner);

                read_session(&inner, stream).await;

                writer.abort();
                if !inner.end_connected(session) {
                    return;
                }
            }
            Err(e) => {
                if !inner.set_session_state(session, ConnectionState::Disconnected) {
                    return;
                }
                inner.errors.notify(&format!("Connection failed: {}", e));
            }
        }

        match delays.next() {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                if !inner.set_session_state(session, ConnectionState::Connecting) {
                    return;
                }
            }
            None => {
                if retry.max_attempts > 0 && inner.session_is_current(session) {
                    let err = Error::ReconnectFailed {
                        attempts: retry.max_attempts,
                        last_error: "connection lost".to_string(),
                    };
                    inner.errors.notify(&err.to_string());
                }
                return;
            }
        }
    }
}

/// Read inbound envelopes until the session ends. Unparseable frames are
/// skipped; transport errors end the session.
async fn read_session(
    inner: &Arc<Inner>,
    mut stream: Pin<Box<dyn Stream<Item = Result<WireMessage>> + Send>>,
) {
    while let Some(item) = stream.next().await {
        match item {
            Ok(envelope) => inner.handle_wire(envelope),
            Err(Error::Json(e)) => debug!(error = %e, "skipping unparseable frame"),
            Err(Error::ConnectionClosed) => {
                debug!("server closed the connection");
                return;
            }
            Err(e) => {
                inner.errors.notify(&e.to_string());
                return;
            }
        }
    }
}

async fn pump_outbound(mut sink: WireSink, mut rx: mpsc::UnboundedReceiver<WireMessage>) {
    while let Some(msg) = rx.recv().await {
        if let Err(e) = sink.send(&msg).await {
            warn!(error = %e, "failed to send outbound message");
            return;
        }
    }
}

fn schedule_auto_join(inner: &Arc<Inner>) {
    let delay = inner.config.join_delay();
    let match_id = inner.config.default_match_id.clone();
    let task_inner = Arc::clone(inner);

    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!(match_id = %match_id, "auto-joining default match");
        task_inner.emit(WireMessage::join_match(&match_id));
    });

    if let Some(old) = lock(&inner.join_task).replace(handle) {
        old.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(SocketConfig::new("ws://127.0.0.1:9/feed")).unwrap()
    }

    fn recorded_states(manager: &ConnectionManager) -> (Arc<Mutex<Vec<ConnectionState>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = manager.subscribe_state(move |state| lock(&sink).push(*state));
        (seen, sub)
    }

    #[test]
    fn test_subscribers_all_notified() {
        let list: Arc<SubscriberList<u32>> = SubscriberList::new();
        let count = Arc::new(AtomicUsize::new(0));

        let a = Arc::clone(&count);
        let _sub_a = list.add(Arc::new(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        }));
        let b = Arc::clone(&count);
        let _sub_b = list.add(Arc::new(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
        }));

        list.notify(&7);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_detach_stops_delivery() {
        let list: Arc<SubscriberList<u32>> = SubscriberList::new();
        let count = Arc::new(AtomicUsize::new(0));

        let a = Arc::clone(&count);
        let sub = list.add(Arc::new(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        }));

        list.notify(&1);
        sub.detach();
        list.notify(&2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let list: Arc<SubscriberList<u32>> = SubscriberList::new();
        let count = Arc::new(AtomicUsize::new(0));

        let _panicky = list.add(Arc::new(|_| panic!("subscriber bug")));
        let a = Arc::clone(&count);
        let _sub = list.add(Arc::new(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        }));

        list.notify(&1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_describe_error_preference_order() {
        let err = serde_json::json!({
            "message": "timeout",
            "description": "handshake timed out",
            "type": "TransportError"
        });
        assert_eq!(describe_error(&err), "timeout");

        let err = serde_json::json!({ "description": "handshake timed out", "type": "T" });
        assert_eq!(describe_error(&err), "handshake timed out");

        let err = serde_json::json!({ "type": "TransportError" });
        assert_eq!(describe_error(&err), "TransportError");

        assert_eq!(describe_error(&Value::String("boom".into())), "boom");
        assert_eq!(describe_error(&Value::Null), "unknown error");
        assert_eq!(describe_error(&serde_json::json!({ "code": 7 })), r#"{"code":7}"#);
    }

    #[tokio::test]
    async fn test_connect_twice_emits_single_transition() {
        let manager = manager();
        let (seen, _sub) = recorded_states(&manager);

        manager.connect();
        manager.connect();

        assert_eq!(manager.state(), ConnectionState::Connecting);
        assert_eq!(*lock(&seen), vec![ConnectionState::Connecting]);
    }

    #[tokio::test]
    async fn test_disconnect_mid_connecting() {
        let manager = manager();
        let (seen, _sub) = recorded_states(&manager);

        manager.connect();
        manager.disconnect();

        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert_eq!(
            *lock(&seen),
            vec![ConnectionState::Connecting, ConnectionState::Disconnected]
        );
        assert!(lock(&manager.inner.join_task).is_none());
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let manager = manager();
        let (seen, _sub) = recorded_states(&manager);

        manager.connect();
        manager.disconnect();
        manager.disconnect();

        // The second disconnect emits no duplicate notification
        assert_eq!(
            *lock(&seen),
            vec![ConnectionState::Connecting, ConnectionState::Disconnected]
        );
    }

    #[tokio::test]
    async fn test_stale_io_task_cannot_resurrect_connection() {
        let manager = manager();
        let (seen, _sub) = recorded_states(&manager);

        manager.connect();
        let session = lock(&manager.inner.state).session;
        manager.disconnect();

        // An I/O task from the superseded session finishing its handshake
        // now must back out instead of reviving the connection
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(!manager.inner.begin_connected(session, tx));
        assert!(!manager.inner.end_connected(session));
        assert!(!manager
            .inner
            .set_session_state(session, ConnectionState::Connecting));

        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert!(lock(&manager.inner.outbound).is_none());
        assert_eq!(
            *lock(&seen),
            vec![ConnectionState::Connecting, ConnectionState::Disconnected]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_join_fires_after_settle_delay() {
        let manager = manager();
        let session = lock(&manager.inner.state).session;
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(manager.inner.begin_connected(session, tx));

        schedule_auto_join(&manager.inner);
        tokio::time::sleep(manager.inner.config.join_delay() * 2).await;

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.event, "join_match");
        assert_eq!(msg.data["matchId"], "match_123");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_cancels_scheduled_auto_join() {
        let manager = manager();
        let session = lock(&manager.inner.state).session;
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(manager.inner.begin_connected(session, tx));

        schedule_auto_join(&manager.inner);
        assert!(lock(&manager.inner.join_task).is_some());

        manager.disconnect();
        assert!(lock(&manager.inner.join_task).is_none());

        // Even past the settle delay, the cancelled join emits nothing
        tokio::time::sleep(manager.inner.config.join_delay() * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_outbound_is_noop_when_disconnected() {
        let manager = manager();
        manager.join_match("match_123");
        manager.leave_match("match_123");
        manager.request_history("match_123");
        assert_eq!(manager.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_event_message_is_stamped_and_delivered() {
        let manager = manager();
        let seen: Arc<Mutex<Vec<MatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = manager.subscribe_events(move |event| lock(&sink).push(event.clone()));

        manager.inner.handle_wire(WireMessage::named(
            "ball_event",
            serde_json::json!({ "type": "BALL", "payload": { "runs": 4, "batsman": "V. Kohli" } }),
        ));

        let events = lock(&seen);
        assert_eq!(events.len(), 1);
        assert!(events[0].id.is_some());
        assert!(events[0].timestamp.is_some());
        assert_eq!(events[0].kind.label(), "BALL");
    }

    #[test]
    fn test_history_replayed_in_order() {
        let manager = manager();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub =
            manager.subscribe_events(move |event| lock(&sink).push(event.id.clone().unwrap()));

        manager.inner.handle_wire(WireMessage::named(
            "match_history",
            serde_json::json!({
                "events": [
                    { "type": "BALL", "payload": { "runs": 1 }, "id": "a" },
                    { "type": "WICKET", "payload": { "playerOut": "R. Sharma" }, "id": "b" },
                    { "type": "MATCH_STATUS", "payload": { "status": "Chase Begins" }, "id": "c" }
                ]
            }),
        ));

        assert_eq!(*lock(&seen), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_transport_error_messages_surface() {
        let manager = manager();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = manager.subscribe_errors(move |error| lock(&sink).push(error.clone()));

        manager.inner.handle_wire(WireMessage::named(
            "connect_error",
            serde_json::json!({ "message": "refused" }),
        ));
        manager
            .inner
            .handle_wire(WireMessage::named("error", Value::String("boom".into())));

        assert_eq!(
            *lock(&seen),
            vec!["Connection failed: refused", "Socket error: boom"]
        );
    }

    #[test]
    fn test_unknown_wire_message_is_ignored() {
        let manager = manager();
        let seen: Arc<Mutex<Vec<MatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = manager.subscribe_events(move |event| lock(&sink).push(event.clone()));

        manager
            .inner
            .handle_wire(WireMessage::named("scorecard_v2", serde_json::json!({})));

        assert!(lock(&seen).is_empty());
    }
}
