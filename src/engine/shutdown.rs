// src/engine/shutdown.rs

//! One-shot shutdown request (Ctrl-C) delivered to the reaction loop.

use tokio::sync::oneshot;

/// Create a connected handle/signal pair.
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = oneshot::channel();
    (
        ShutdownHandle { tx },
        ShutdownSignal {
            rx: Some(rx),
            requested: false,
        },
    )
}

/// Sending side, held by whoever listens for the interrupt.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    pub fn request(self) {
        // The loop may already have exited on its own.
        let _ = self.tx.send(());
    }
}

/// Receiving side, owned by the reaction loop.
///
/// Dropping the handle without calling [`ShutdownHandle::request`] means
/// "never": the signal then stays pending forever.
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: Option<oneshot::Receiver<()>>,
    requested: bool,
}

impl ShutdownSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self {
            rx: None,
            requested: false,
        }
    }

    /// Non-blocking check, for points between awaits (e.g. before starting
    /// the next reaction of a batch).
    pub fn is_requested(&mut self) -> bool {
        if !self.requested {
            if let Some(rx) = self.rx.as_mut() {
                match rx.try_recv() {
                    Ok(()) => {
                        self.requested = true;
                        self.rx = None;
                    }
                    Err(oneshot::error::TryRecvError::Closed) => self.rx = None,
                    Err(oneshot::error::TryRecvError::Empty) => {}
                }
            }
        }
        self.requested
    }

    /// Resolve once shutdown has been requested; immediately if it already
    /// was.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to the event
    /// wait and be polled again on the next iteration.
    pub async fn requested(&mut self) {
        if self.requested {
            return;
        }

        if let Some(rx) = self.rx.as_mut() {
            if rx.await.is_ok() {
                self.requested = true;
                self.rx = None;
                return;
            }
            self.rx = None;
        }

        std::future::pending::<()>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn request_resolves_signal_and_stays_resolved() {
        let (handle, mut signal) = shutdown_channel();
        assert!(!signal.is_requested());

        handle.request();
        signal.requested().await;
        assert!(signal.is_requested());

        // Resolves again without a second request.
        signal.requested().await;
    }

    #[test]
    fn request_is_visible_without_awaiting() {
        let (handle, mut signal) = shutdown_channel();
        assert!(!signal.is_requested());

        handle.request();
        assert!(signal.is_requested());
        assert!(signal.is_requested());
    }

    #[tokio::test]
    async fn never_signal_stays_pending() {
        let mut signal = ShutdownSignal::never();

        let res = tokio::time::timeout(Duration::from_millis(20), signal.requested()).await;
        assert!(res.is_err());
        assert!(!signal.is_requested());
    }

    #[tokio::test]
    async fn dropped_handle_never_fires() {
        let (handle, mut signal) = shutdown_channel();
        drop(handle);

        let res = tokio::time::timeout(Duration::from_millis(50), signal.requested()).await;
        assert!(res.is_err());
        assert!(!signal.is_requested());
    }
}
