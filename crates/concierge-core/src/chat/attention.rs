//! Periodic attention pulse for the closed chat launcher.
//!
//! Every `interval` the launcher's attention flag is raised for `pulse`,
//! but only while the widget is closed. The task ends on widget teardown.

use std::sync::Arc;
use std::time::Duration;

use concierge_types::event::WidgetEvent;
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::widget::WidgetShared;
use crate::event::EventBus;

/// A zero `interval` disables the pulse.
pub(crate) async fn pulse_attention(
    shared: Arc<Mutex<WidgetShared>>,
    events: EventBus,
    interval: Duration,
    pulse: Duration,
    shutdown: CancellationToken,
) {
    if interval.is_zero() {
        return;
    }

    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        {
            let mut guard = shared.lock().await;
            if guard.state.is_open() {
                continue;
            }
            if guard.state.set_attention(true) {
                trace!("Launcher attention on");
                events.publish(WidgetEvent::AttentionChanged { active: true });
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(pulse) => {}
        }

        let mut guard = shared.lock().await;
        if guard.state.set_attention(false) {
            events.publish(WidgetEvent::AttentionChanged { active: false });
        }
    }
}
