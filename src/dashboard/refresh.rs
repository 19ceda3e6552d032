use std::sync::Arc;

use tokio::sync::watch;

/// Generation counter owned by the dashboard. Publishers bump it after a
/// mutation; subscribers re-fetch whenever it moves.
pub struct RefreshSignal {
    tx: Arc<watch::Sender<u64>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn notifier(&self) -> RefreshNotifier {
        RefreshNotifier {
            tx: Arc::clone(&self.tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RefreshNotifier {
    tx: Arc<watch::Sender<u64>>,
}

impl RefreshNotifier {
    /// A notifier with nobody listening, for one-shot commands.
    pub fn detached() -> Self {
        RefreshSignal::new().notifier()
    }

    pub fn notify(&self) {
        self.tx.send_modify(|generation| *generation += 1);
        tracing::debug!(generation = self.generation(), "refresh requested");
    }

    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_notifications() {
        let signal = RefreshSignal::new();
        let mut rx = signal.subscribe();
        let notifier = signal.notifier();

        notifier.notify();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        notifier.notify();
        notifier.notify();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 3);
    }

    #[test]
    fn notifying_without_subscribers_still_counts() {
        let notifier = RefreshNotifier::detached();
        notifier.notify();
        assert_eq!(notifier.generation(), 1);
    }
}
