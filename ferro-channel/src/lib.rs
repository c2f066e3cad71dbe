// Copyright (c) 2025 FERRO LABS <dev@ferro.network>
//! Named channels with prometheus instrumentation, used for every queue
//! between the node's worker threads.

use prometheus::{Counter, Gauge};
use tracing::error;

use receiver::FerroReceiver;
use sender::FerroSender;

pub mod receiver;
pub mod sender;

#[derive(Clone)]
pub struct FerroChannel {}

impl FerroChannel {
    /// Create a named channel pair. `capacity: None` makes the channel
    /// unbounded; `Some(0)` makes it a rendezvous channel.
    #[allow(clippy::new_ret_no_self)]
    pub fn new<T>(name: String, capacity: Option<usize>) -> (FerroSender<T>, FerroReceiver<T>) {
        let (s, r) = if let Some(capacity) = capacity {
            crossbeam_channel::bounded::<T>(capacity)
        } else {
            crossbeam_channel::unbounded::<T>()
        };

        let actual_len = Gauge::new(
            format!("{}_channel_actual_size", name),
            "Actual length of channel",
        )
        .expect("Failed to create gauge");

        let received = Counter::new(
            format!("{}_channel_total_receive", name),
            "Total received messages",
        )
        .expect("Failed to create counter");

        // Registration fails when a channel with the same name already
        // exists in the process (several pipelines in one test binary);
        // the channel itself keeps working either way.
        if let Err(e) = prometheus::register(Box::new(actual_len.clone())) {
            error!("Failed to register actual_len gauge for {} : {}", name, e);
        }
        if let Err(e) = prometheus::register(Box::new(received.clone())) {
            error!("Failed to register received counter for {} : {}", name, e);
        }

        let sender = FerroSender {
            sender: s,
            name: name.clone(),
            actual_len: actual_len.clone(),
        };

        let receiver = FerroReceiver {
            receiver: r,
            name,
            actual_len,
            received,
            ref_counter: std::sync::Arc::new(()),
        };

        (sender, receiver)
    }
}
