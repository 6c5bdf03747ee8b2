use std::{future::Future, time::Duration};
use tokio_util::sync::CancellationToken;

/// Single-flight delayed task runner.
///
/// Each [`schedule`](Debouncer::schedule) cancels whatever was pending and
/// starts a fresh quiet period. Only the most recently scheduled task can run.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let finished = token.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = async {
                    tokio::time::sleep(delay).await;
                    task.await;
                    // Marks the slot idle once the task has run.
                    finished.cancel();
                } => {}
            }
        });

        self.pending = Some(token);
    }

    /// Cancel the pending task, including one whose timer already fired.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether a task is waiting out its quiet period or still running.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
