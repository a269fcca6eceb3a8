use std::time::Duration;

use tokio::task::JoinHandle;

/// A one-shot delayed action that can be rescheduled or cancelled.
///
/// Scheduling again aborts the pending action. Dropping the timer aborts
/// it as well, so nothing fires after its owner is gone.
#[derive(Debug, Default)]
pub struct Deferred {
    pending: Option<JoinHandle<()>>,
}

impl Deferred {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay`. Must be called inside a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
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

impl Drop for Deferred {
    fn drop(&mut self) {
        self.cancel();
    }
}
