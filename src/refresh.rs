//! In-process refresh signals.
//!
//! After a write succeeds, the writer publishes a [`RefreshSignal`]; every display
//! component that cares subscribes and re-fetches its own data after a fixed delay.
//! There is no shared cache and no coalescing beyond that delay.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const BUS_CAPACITY: usize = 32;

/// Named refresh notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshSignal {
    RsvpUpdated,
    EntourageUpdated,
}

impl RefreshSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshSignal::RsvpUpdated => "rsvpUpdated",
            RefreshSignal::EntourageUpdated => "entourageUpdated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rsvpUpdated" => Some(RefreshSignal::RsvpUpdated),
            "entourageUpdated" => Some(RefreshSignal::EntourageUpdated),
            _ => None,
        }
    }
}

impl std::fmt::Display for RefreshSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broadcast bus for refresh signals. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshSignal>,
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publish a signal. Returns the number of listeners that will see it.
    pub fn publish(&self, signal: RefreshSignal) -> usize {
        match self.tx.send(signal) {
            Ok(receivers) => {
                tracing::debug!(signal = %signal, receivers, "Published refresh signal");
                receivers
            }
            Err(_) => {
                tracing::debug!(signal = %signal, "Refresh signal published with no listeners");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshSignal> {
        self.tx.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Spawn a task that runs `on_refresh` `delay` after every matching signal.
///
/// Signals are handled one at a time, so a burst of signals yields one fetch per signal,
/// each after its own delay. The task ends when every bus handle is dropped; abort the
/// returned handle to stop listening earlier.
pub fn spawn_refresh_listener<F, Fut>(
    bus: &RefreshBus,
    signal: RefreshSignal,
    delay: Duration,
    mut on_refresh: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(received) if received == signal => {
                    tokio::time::sleep(delay).await;
                    on_refresh().await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(signal = %signal, skipped, "Refresh listener lagged, refreshing");
                    tokio::time::sleep(delay).await;
                    on_refresh().await;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_signal_names() {
        assert_eq!(RefreshSignal::RsvpUpdated.as_str(), "rsvpUpdated");
        assert_eq!(
            RefreshSignal::parse("entourageUpdated"),
            Some(RefreshSignal::EntourageUpdated)
        );
        assert_eq!(RefreshSignal::parse("other"), None);
    }

    #[test]
    fn test_publish_without_listeners() {
        let bus = RefreshBus::new();
        assert_eq!(bus.publish(RefreshSignal::RsvpUpdated), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_waits_for_delay() {
        let bus = RefreshBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let handle = spawn_refresh_listener(
            &bus,
            RefreshSignal::RsvpUpdated,
            Duration::from_secs(2),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
        );

        assert_eq!(bus.publish(RefreshSignal::RsvpUpdated), 1);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_ignores_other_signals() {
        let bus = RefreshBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let handle = spawn_refresh_listener(
            &bus,
            RefreshSignal::EntourageUpdated,
            Duration::from_secs(1),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
        );

        bus.publish(RefreshSignal::RsvpUpdated);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        bus.publish(RefreshSignal::EntourageUpdated);
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        handle.abort();
    }
}
