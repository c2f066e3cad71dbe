// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use ferro_models::{Address, Receipt, Transaction};

use crate::{ExecutionController, ExecutionResult};

/// Test tool to observe and answer execution engine calls
pub struct ExecutionEventReceiver(pub Receiver<MockExecutionControllerMessage>);

/// List of possible messages you can receive from the mock.
#[derive(Debug)]
pub enum MockExecutionControllerMessage {
    /// A transaction is being applied
    ApplyTransaction {
        /// coinbase of the in-progress block, if sealing
        coinbase: Option<Address>,
        /// the transaction being applied
        tx: Transaction,
        /// Response channel
        response_tx: Sender<ExecutionResult<Receipt>>,
    },
}

/// Mock execution engine: forwards every call to the test as a message and
/// blocks until the test answers.
#[derive(Clone)]
pub struct MockExecutionController(Sender<MockExecutionControllerMessage>);

impl MockExecutionController {
    /// Create a new mock along with the receiver the test drains.
    pub fn new_with_receiver() -> (Box<dyn ExecutionController>, ExecutionEventReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (
            Box::new(MockExecutionController(tx)),
            ExecutionEventReceiver(rx),
        )
    }
}

impl ExecutionEventReceiver {
    /// Wait for a message matching `filter_map`, up to `timeout`.
    pub fn wait_command<F, T>(&self, timeout: Duration, filter_map: F) -> Option<T>
    where
        F: Fn(MockExecutionControllerMessage) -> Option<T>,
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

impl ExecutionController for MockExecutionController {
    fn apply_transaction(
        &self,
        _header: &ferro_models::BlockHeader,
        coinbase: Option<&Address>,
        tx: &Transaction,
    ) -> ExecutionResult<Receipt> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockExecutionControllerMessage::ApplyTransaction {
                coinbase: coinbase.copied(),
                tx: tx.clone(),
                response_tx,
            })
            .expect("mock execution controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock execution controller")
    }

    fn clone_box(&self) -> Box<dyn ExecutionController> {
        Box::new(self.clone())
    }
}
