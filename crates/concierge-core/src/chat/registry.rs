//! Registry of live chat widgets, keyed by id.
//!
//! The REST server holds one widget per browser session. Widgets live only
//! in memory; removing one (or dropping the registry) tears it down. Abandoned
//! sessions are evicted by the idle reaper once `session_idle_ttl` passes
//! without a client call.

use std::sync::{Arc, Weak};
use std::time::Duration;

use concierge_types::config::WidgetConfig;
use concierge_types::error::ChatError;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::widget::ChatWidget;
use crate::assistant::resolver::ReplyResolver;

pub struct WidgetRegistry {
    widgets: DashMap<Uuid, Arc<ChatWidget>>,
    resolver: ReplyResolver,
    config: WidgetConfig,
}

impl WidgetRegistry {
    pub fn new(resolver: ReplyResolver, config: WidgetConfig) -> Self {
        Self {
            widgets: DashMap::new(),
            resolver,
            config,
        }
    }

    /// Spawn a new widget and register it. Requires a Tokio runtime.
    pub fn create(&self) -> Arc<ChatWidget> {
        let widget = Arc::new(ChatWidget::spawn(self.resolver, &self.config));
        self.widgets.insert(widget.id(), widget.clone());
        info!(widget_id = %widget.id(), live = self.widgets.len(), "Widget session created");
        widget
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<ChatWidget>, ChatError> {
        self.widgets
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(ChatError::SessionNotFound(*id))
    }

    /// Unregister and shut down a widget.
    pub fn remove(&self, id: &Uuid) -> Result<(), ChatError> {
        let (_, widget) = self
            .widgets
            .remove(id)
            .ok_or(ChatError::SessionNotFound(*id))?;
        widget.shutdown();
        info!(widget_id = %id, live = self.widgets.len(), "Widget session removed");
        Ok(())
    }

    /// Shut down and drop every widget idle for at least the configured TTL.
    /// Returns how many were evicted.
    pub fn evict_idle(&self) -> usize {
        let ttl = self.config.session_idle_ttl();
        if ttl.is_zero() {
            return 0;
        }

        let expired: Vec<Uuid> = self
            .widgets
            .iter()
            .filter(|entry| entry.value().idle_for() >= ttl)
            .map(|entry| *entry.key())
            .collect();

        let mut evicted = 0;
        for id in expired {
            if let Some((_, widget)) = self.widgets.remove(&id) {
                widget.shutdown();
                evicted += 1;
                debug!(widget_id = %id, "Idle widget session evicted");
            }
        }
        if evicted > 0 {
            info!(evicted, live = self.widgets.len(), "Idle widget sessions evicted");
        }
        evicted
    }

    /// Periodically evict idle sessions. `None` when the TTL is zero.
    ///
    /// The task holds only a weak reference and ends with the registry.
    pub fn spawn_reaper(registry: &Arc<Self>) -> Option<JoinHandle<()>> {
        let ttl = registry.config.session_idle_ttl();
        if ttl.is_zero() {
            return None;
        }
        let period = (ttl / 4).max(Duration::from_secs(1));
        let weak = Arc::downgrade(registry);
        Some(tokio::spawn(reap_idle(weak, period)))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

async fn reap_idle(registry: Weak<WidgetRegistry>, period: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(registry) = registry.upgrade() else {
            break;
        };
        registry.evict_idle();
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("live", &self.widgets.len())
            .finish()
    }
}
