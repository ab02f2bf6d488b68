//! Shutdown coordination for the API server.
//!
//! `Shutdown` is owned by whoever decides when the server stops (the signal
//! task in production, the test harness in tests). The server holds a
//! `ShutdownSignal` and starts draining once it resolves. Dropping the
//! coordinator counts as a trigger, so a server never outlives its owner.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: AtomicBool::new(false),
        }
    }

    /// A signal that resolves on `trigger` or when this coordinator drops.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Start shutdown. Only the first call notifies subscribers.
    pub fn trigger(&self) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(
            servers = self.tx.receiver_count(),
            "Shutdown triggered"
        );
        let _ = self.tx.send(());
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to `HttpServer::run`.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl ShutdownSignal {
    pub async fn wait(mut self) {
        // Ok on trigger, Closed once the coordinator is gone
        let _ = self.rx.recv().await;
    }
}
