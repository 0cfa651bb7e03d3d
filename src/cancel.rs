//! Cooperative cancellation for in-flight pipeline work

use tokio::sync::watch;

/// Cancellation token passed down the pipeline call chain.
///
/// Long-running stages check `is_cancelled` at safe points; external calls race
/// `cancelled()` in a `select!` so an abort interrupts the call instead of
/// waiting for it to complete. Cloning shares the underlying flag.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: watch::Sender<bool>,
    receiver: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Create a new token (not cancelled).
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self { sender, receiver }
    }

    /// Request cancellation and wake all waiters.
    pub fn cancel(&self) {
        // Receivers are held by every clone, so send cannot fail
        let _ = self.sender.send(true);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve when cancellation is requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // wait_for returns immediately if the current value already matches
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
