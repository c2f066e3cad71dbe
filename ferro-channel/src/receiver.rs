// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use prometheus::{Counter, Gauge};

/// Instrumented receiving half of a channel.
#[derive(Clone)]
pub struct FerroReceiver<T> {
    pub(crate) receiver: Receiver<T>,
    #[allow(dead_code)]
    pub(crate) name: String,
    /// channel size
    pub(crate) actual_len: Gauge,
    /// total received messages
    pub(crate) received: Counter,
    /// reference counter to know how many receivers are cloned
    pub(crate) ref_counter: Arc<()>,
}

impl<T> Drop for FerroReceiver<T> {
    fn drop(&mut self) {
        if Arc::strong_count(&self.ref_counter) == 1 {
            // last receiver clone, unregister the channel metrics
            let _ = prometheus::unregister(Box::new(self.actual_len.clone()));
            let _ = prometheus::unregister(Box::new(self.received.clone()));
        }
    }
}

impl<T> FerroReceiver<T> {
    /// Refresh the channel metrics after a message was taken outside of the
    /// wrapper methods (typically a `select!` arm).
    pub fn update_metrics(&self) {
        self.actual_len.set(self.receiver.len() as f64);
        self.received.inc();
    }

    /// Attempt to receive a message without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        match self.receiver.try_recv() {
            Ok(msg) => {
                self.update_metrics();
                Ok(msg)
            }
            Err(e) => Err(e),
        }
    }

    /// Receive a message, blocking until one arrives or all senders drop.
    pub fn recv(&self) -> Result<T, RecvError> {
        match self.receiver.recv() {
            Ok(msg) => {
                self.update_metrics();
                Ok(msg)
            }
            Err(e) => Err(e),
        }
    }

    /// Receive a message, giving up at `deadline`.
    pub fn recv_deadline(&self, deadline: Instant) -> Result<T, RecvTimeoutError> {
        match self.receiver.recv_deadline(deadline) {
            Ok(msg) => {
                self.update_metrics();
                Ok(msg)
            }
            Err(e) => Err(e),
        }
    }

    /// Receive a message, giving up after `timeout`.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Result<T, RecvTimeoutError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => {
                self.update_metrics();
                Ok(msg)
            }
            Err(e) => Err(e),
        }
    }
}

impl<T> Deref for FerroReceiver<T> {
    type Target = Receiver<T>;

    fn deref(&self) -> &Self::Target {
        &self.receiver
    }
}

impl<T> DerefMut for FerroReceiver<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.receiver
    }
}
