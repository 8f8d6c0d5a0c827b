//! Chat widget driver: session state plus delayed reply delivery.
//!
//! `submit` appends the user's message immediately and queues the resolved
//! reply for delivery after the thinking delay. One worker task drains the
//! queue in order, so replies land in the same order as their submissions.
//!
//! Closing the widget does not cancel in-flight replies; they still land in
//! the hidden transcript. `cancel_pending` drops everything queued so far.
//! Dropping the widget (or calling `shutdown`) stops the worker and the
//! attention pulse.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use concierge_types::chat::{ChatMessage, SessionSnapshot};
use concierge_types::config::WidgetConfig;
use concierge_types::error::ChatError;
use concierge_types::event::WidgetEvent;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::attention::pulse_attention;
use super::session::ChatSessionState;
use crate::assistant::normalize::is_blank;
use crate::assistant::resolver::{Resolution, ReplyResolver};
use crate::event::EventBus;

/// State shared between the widget handle and its background tasks.
pub(crate) struct WidgetShared {
    pub(crate) state: ChatSessionState,
    /// Token handed to every reply queued since the last `cancel_pending`.
    in_flight: CancellationToken,
}

struct PendingReply {
    trigger_id: u64,
    due: Instant,
    resolution: Resolution,
    cancel: CancellationToken,
}

/// One live chat widget.
///
/// Must be created inside a Tokio runtime: construction spawns the delivery
/// worker and the attention pulse.
pub struct ChatWidget {
    id: Uuid,
    shared: Arc<Mutex<WidgetShared>>,
    resolver: ReplyResolver,
    events: EventBus,
    queue: mpsc::UnboundedSender<PendingReply>,
    thinking_delay: Duration,
    shutdown: CancellationToken,
    started: Instant,
    /// Milliseconds after `started` of the last call from a client.
    last_activity_ms: AtomicU64,
}

impl ChatWidget {
    pub fn spawn(resolver: ReplyResolver, config: &WidgetConfig) -> Self {
        let id = Uuid::now_v7();
        let shutdown = CancellationToken::new();
        let shared = Arc::new(Mutex::new(WidgetShared {
            state: ChatSessionState::new(config.start_open),
            in_flight: shutdown.child_token(),
        }));
        let events = EventBus::new(config.event_capacity);
        let (queue, rx) = mpsc::unbounded_channel();

        tokio::spawn(deliver_replies(
            rx,
            shared.clone(),
            events.clone(),
            shutdown.clone(),
        ));
        tokio::spawn(pulse_attention(
            shared.clone(),
            events.clone(),
            config.attention_interval(),
            config.attention_pulse(),
            shutdown.clone(),
        ));

        info!(widget_id = %id, delay_ms = config.thinking_delay_ms, "Chat widget started");

        Self {
            id,
            shared,
            resolver,
            events,
            queue,
            thinking_delay: config.thinking_delay(),
            shutdown,
            started: Instant::now(),
            last_activity_ms: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn thinking_delay(&self) -> Duration {
        self.thinking_delay
    }

    /// Subscribe to future widget events.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    /// Append a user message and schedule its reply.
    ///
    /// Blank input changes nothing and returns `EmptyUtterance`.
    pub async fn submit(&self, text: &str) -> Result<ChatMessage, ChatError> {
        if self.shutdown.is_cancelled() {
            return Err(ChatError::WidgetClosed);
        }
        self.touch();
        if is_blank(text) {
            return Err(ChatError::EmptyUtterance);
        }

        let mut shared = self.shared.lock().await;
        let message = shared
            .state
            .submit(text)
            .ok_or(ChatError::EmptyUtterance)?;

        let resolution = self.resolver.resolve(text);
        debug!(
            widget_id = %self.id,
            trigger_id = message.id,
            rule = resolution.rule,
            "Reply scheduled"
        );

        let pending = PendingReply {
            trigger_id: message.id,
            due: Instant::now() + self.thinking_delay,
            resolution,
            cancel: shared.in_flight.clone(),
        };
        if self.queue.send(pending).is_err() {
            shared.state.abandon_replies();
            return Err(ChatError::WidgetClosed);
        }

        // Published under the lock so subscribers see transcript order.
        self.events.publish(WidgetEvent::MessageAppended {
            message: message.clone(),
        });
        self.events
            .publish(WidgetEvent::TypingChanged { is_typing: true });

        Ok(message)
    }

    /// Drop every reply queued so far. Later submissions are unaffected.
    pub async fn cancel_pending(&self) {
        self.touch();
        let mut shared = self.shared.lock().await;
        shared.in_flight.cancel();
        shared.in_flight = self.shutdown.child_token();
        if shared.state.is_typing() {
            shared.state.abandon_replies();
            self.events
                .publish(WidgetEvent::TypingChanged { is_typing: false });
        }
        info!(widget_id = %self.id, "Pending replies cancelled");
    }

    /// Flip the open flag; returns the new value.
    pub async fn toggle_open(&self) -> bool {
        self.touch();
        let mut shared = self.shared.lock().await;
        let is_open = shared.state.toggle_open();
        if is_open && shared.state.set_attention(false) {
            self.events
                .publish(WidgetEvent::AttentionChanged { active: false });
        }
        self.publish_visibility(&shared.state);
        is_open
    }

    /// Flip the minimized flag; returns the new value.
    pub async fn toggle_minimize(&self) -> bool {
        self.touch();
        let mut shared = self.shared.lock().await;
        let is_minimized = shared.state.toggle_minimize();
        self.publish_visibility(&shared.state);
        is_minimized
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.touch();
        self.shared.lock().await.state.snapshot()
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.touch();
        self.shared.lock().await.state.transcript().to_vec()
    }

    /// Record client activity now.
    pub fn touch(&self) {
        let elapsed = self.started.elapsed().as_millis() as u64;
        self.last_activity_ms.fetch_max(elapsed, Ordering::Relaxed);
    }

    /// Time since the last client call (or since creation).
    pub fn idle_for(&self) -> Duration {
        let last = self.started + Duration::from_millis(self.last_activity_ms.load(Ordering::Relaxed));
        Instant::now().saturating_duration_since(last)
    }

    /// Stop the delivery worker and the attention pulse, then tell
    /// subscribers the session is gone.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            self.shutdown.cancel();
            self.events.publish(WidgetEvent::SessionClosed);
            info!(widget_id = %self.id, "Chat widget shut down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Resolves once the widget has been shut down.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await
    }

    fn publish_visibility(&self, state: &ChatSessionState) {
        self.events.publish(WidgetEvent::VisibilityChanged {
            is_open: state.is_open(),
            is_minimized: state.is_minimized(),
        });
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("id", &self.id)
            .field("thinking_delay", &self.thinking_delay)
            .field("shut_down", &self.shutdown.is_cancelled())
            .finish()
    }
}

/// Deliver queued replies in FIFO order once each one is due.
async fn deliver_replies(
    mut queue: mpsc::UnboundedReceiver<PendingReply>,
    shared: Arc<Mutex<WidgetShared>>,
    events: EventBus,
    shutdown: CancellationToken,
) {
    loop {
        let pending = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = queue.recv() => match next {
                Some(pending) => pending,
                None => break,
            },
        };

        let cancelled = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = pending.cancel.cancelled() => true,
            _ = tokio::time::sleep_until(pending.due) => false,
        };

        let mut guard = shared.lock().await;
        // cancel_pending may have run while we waited for the lock
        if cancelled || pending.cancel.is_cancelled() {
            debug!(trigger_id = pending.trigger_id, "Pending reply dropped");
            events.publish(WidgetEvent::ReplyCancelled {
                trigger_id: pending.trigger_id,
            });
            continue;
        }

        let Resolution { rule, reply, .. } = pending.resolution;
        let navigate_to = reply.navigate_to.clone();
        let message = guard.state.complete_reply(reply);
        debug!(
            trigger_id = pending.trigger_id,
            message_id = message.id,
            rule,
            "Reply delivered"
        );

        events.publish(WidgetEvent::MessageAppended { message });
        events.publish(WidgetEvent::TypingChanged { is_typing: false });
        if let Some(target) = navigate_to {
            events.publish(WidgetEvent::NavigationRequested { target });
        }
    }

    debug!("Reply delivery worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_types::chat::Sender;

    use crate::assistant::rules::SANDRA_QUOTE;

    const DELAY_MS: u64 = 1_000;

    fn test_config() -> WidgetConfig {
        WidgetConfig {
            thinking_delay_ms: DELAY_MS,
            attention_interval_ms: 0,
            start_open: true,
            ..WidgetConfig::default()
        }
    }

    fn widget() -> ChatWidget {
        ChatWidget::spawn(ReplyResolver::new(), &test_config())
    }

    async fn wait_past_delay() {
        tokio::time::sleep(Duration::from_millis(DELAY_MS + 1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn hello_scenario() {
        let widget = widget();

        widget.submit("Hello").await.unwrap();
        let snap = widget.snapshot().await;
        assert_eq!(snap.transcript.len(), 1);
        assert_eq!(snap.transcript[0].sender, Sender::User);
        assert!(snap.is_typing);

        tokio::time::sleep(Duration::from_millis(DELAY_MS / 2)).await;
        let snap = widget.snapshot().await;
        assert_eq!(snap.transcript.len(), 1);
        assert!(snap.is_typing);

        wait_past_delay().await;
        let snap = widget.snapshot().await;
        assert_eq!(snap.transcript.len(), 2);
        assert_eq!(snap.transcript[1].sender, Sender::Bot);
        assert!(snap.transcript[1].content.starts_with("Hello!"));
        assert!(!snap.is_typing);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submit_is_noop() {
        let widget = widget();
        let mut rx = widget.subscribe();

        assert!(matches!(widget.submit("").await, Err(ChatError::EmptyUtterance)));
        assert!(matches!(widget.submit("   ").await, Err(ChatError::EmptyUtterance)));

        wait_past_delay().await;
        let snap = widget.snapshot().await;
        assert!(snap.transcript.is_empty());
        assert!(!snap.is_typing);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn padded_input_is_kept_verbatim() {
        let widget = widget();

        let message = widget.submit("  Hello \t").await.unwrap();
        assert_eq!(message.content, "  Hello \t");

        wait_past_delay().await;
        let transcript = widget.transcript().await;
        assert_eq!(transcript[0].content, "  Hello \t");
        assert!(transcript[1].content.starts_with("Hello!"));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_double_submit_is_fifo() {
        let widget = widget();

        widget.submit("testimonial sandra").await.unwrap();
        widget.submit("thanks").await.unwrap();
        assert_eq!(widget.transcript().await.len(), 2);

        wait_past_delay().await;
        let transcript = widget.transcript().await;
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[1].sender, Sender::User);
        assert_eq!(transcript[2].content, SANDRA_QUOTE);
        assert!(transcript[3].content.starts_with("You're welcome"));
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_event_follows_reply() {
        let widget = widget();
        let mut rx = widget.subscribe();

        widget.submit("Show me your services").await.unwrap();
        wait_past_delay().await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event);
        }
        assert!(matches!(kinds[0], WidgetEvent::MessageAppended { .. }));
        assert!(matches!(kinds[1], WidgetEvent::TypingChanged { is_typing: true }));
        assert!(matches!(kinds[2], WidgetEvent::MessageAppended { .. }));
        assert!(matches!(kinds[3], WidgetEvent::TypingChanged { is_typing: false }));
        match &kinds[4] {
            WidgetEvent::NavigationRequested { target } => assert_eq!(target, "/#services"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(
            widget.snapshot().await.last_navigation.as_deref(),
            Some("/#services")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closing_mid_delay_still_delivers() {
        let widget = widget();
        widget.submit("Hello").await.unwrap();

        assert!(!widget.toggle_open().await);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(widget.toggle_open().await);

        wait_past_delay().await;
        assert_eq!(widget.transcript().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_delay_drops_reply() {
        let widget = widget();
        let mut rx = widget.subscribe();

        widget.submit("Hello").await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        widget.cancel_pending().await;

        let snap = widget.snapshot().await;
        assert!(!snap.is_typing);

        wait_past_delay().await;
        let transcript = widget.transcript().await;
        assert_eq!(transcript.len(), 1);

        let mut saw_cancel = false;
        while let Ok(event) = rx.try_recv() {
            if let WidgetEvent::ReplyCancelled { trigger_id } = event {
                assert_eq!(trigger_id, 1);
                saw_cancel = true;
            }
        }
        assert!(saw_cancel);
    }

    #[tokio::test(start_paused = true)]
    async fn submissions_after_cancel_are_delivered() {
        let widget = widget();
        widget.submit("Hello").await.unwrap();
        widget.cancel_pending().await;
        widget.submit("thank you").await.unwrap();

        wait_past_delay().await;
        let transcript = widget.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].sender, Sender::Bot);
        assert!(transcript[2].content.starts_with("You're welcome"));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_delivery() {
        let widget = widget();
        widget.submit("Hello").await.unwrap();
        widget.shutdown();

        wait_past_delay().await;
        assert_eq!(widget.transcript().await.len(), 1);
        assert!(matches!(widget.submit("Hello").await, Err(ChatError::WidgetClosed)));
        tokio::time::timeout(Duration::from_millis(1), widget.closed())
            .await
            .expect("closed() resolves after shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn activity_resets_idle_time() {
        let widget = widget();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(widget.idle_for() >= Duration::from_secs(30));

        widget.snapshot().await;
        assert_eq!(widget.idle_for(), Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(5)).await;
        widget.toggle_minimize().await;
        assert_eq!(widget.idle_for(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_publishes_session_closed() {
        let widget = widget();
        let mut rx = widget.subscribe();
        widget.shutdown();
        widget.shutdown();

        assert!(matches!(rx.try_recv(), Ok(WidgetEvent::SessionClosed)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn toggles_publish_visibility() {
        let widget = widget();
        let mut rx = widget.subscribe();

        assert!(widget.toggle_minimize().await);
        match rx.recv().await.unwrap() {
            WidgetEvent::VisibilityChanged { is_open, is_minimized } => {
                assert!(is_open);
                assert!(is_minimized);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(!widget.toggle_open().await);
        assert!(widget.toggle_open().await);
        let snap = widget.snapshot().await;
        assert!(snap.is_open);
        assert!(!snap.is_minimized);
    }
}
