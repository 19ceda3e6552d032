use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs a future after a quiet period. Scheduling again restarts the wait and
/// drops the earlier future; dropping the debouncer cancels whatever is
/// pending.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(async move {
            let _ = tx.send("fetch");
        });
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some("fetch"));
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_coalesces_into_last_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for query in ["b", "bi", "bil", "billing"] {
            let tx = tx.clone();
            debouncer.schedule(async move {
                let _ = tx.send(query);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        let mut fired = Vec::new();
        while let Ok(query) = rx.try_recv() {
            fired.push(query);
        }
        assert_eq!(fired, vec!["billing"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_action() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let task_tx = tx.clone();
        debouncer.schedule(async move {
            let _ = task_tx.send(());
        });
        assert!(debouncer.is_pending());

        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        drop(tx);
    }
}
