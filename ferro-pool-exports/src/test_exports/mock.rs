// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use ferro_models::{Address, Transaction};

use crate::{PoolController, PoolResult};

/// Test tool to observe and answer pool controller calls
pub struct PoolEventReceiver(pub Receiver<MockPoolControllerMessage>);

/// List of possible messages you can receive from the mock.
#[derive(Debug)]
pub enum MockPoolControllerMessage {
    /// The executable transaction set was requested
    Pending {
        /// Response channel
        response_tx: Sender<PoolResult<BTreeMap<Address, Vec<Transaction>>>>,
    },
}

/// Mock pool controller: forwards every call to the test as a message and
/// blocks until the test answers.
#[derive(Clone)]
pub struct MockPoolController(Sender<MockPoolControllerMessage>);

impl MockPoolController {
    /// Create a new mock along with the receiver the test drains.
    pub fn new_with_receiver() -> (Box<dyn PoolController>, PoolEventReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Box::new(MockPoolController(tx)), PoolEventReceiver(rx))
    }
}

impl PoolEventReceiver {
    /// Wait for a message matching `filter_map`, up to `timeout`.
    pub fn wait_command<F, T>(&self, timeout: Duration, filter_map: F) -> Option<T>
    where
        F: Fn(MockPoolControllerMessage) -> Option<T>,
    {
        let deadline = Instant::now() + timeout;
        loop {
            match self.0.recv_deadline(deadline) {
                Ok(msg) => {
                    if let Some(found) = filter_map(msg) {
                        return Some(found);
                    }
                }
                Err(_) => return None,
            }
        }
    }
}

impl PoolController for MockPoolController {
    fn pending(&self) -> PoolResult<BTreeMap<Address, Vec<Transaction>>> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockPoolControllerMessage::Pending { response_tx })
            .expect("mock pool controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock pool controller")
    }

    fn clone_box(&self) -> Box<dyn PoolController> {
        Box::new(self.clone())
    }
}
