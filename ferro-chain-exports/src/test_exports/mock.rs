// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use ferro_models::{Block, BlockId, ExecutionOutput};

use crate::{ChainController, ChainResult, ConfirmationTracker, WriteStatus};

/// Test tool to observe and answer chain controller calls
pub struct ChainEventReceiver(pub Receiver<MockChainControllerMessage>);

/// List of possible messages you can receive from the mock.
/// Each variant corresponds to a unique method in `ChainController`;
/// variants with a `response_tx` field wait for an answer.
#[derive(Debug)]
pub enum MockChainControllerMessage {
    /// Current canonical head requested
    CurrentBlock {
        /// Response channel
        response_tx: Sender<Block>,
    },
    /// Canonical id at a height requested
    BlockIdAt {
        /// queried height
        number: u64,
        /// Response channel
        response_tx: Sender<Option<BlockId>>,
    },
    /// A sealed block is being committed
    WriteBlockWithState {
        /// the block being written
        block: Block,
        /// its execution output
        output: ExecutionOutput,
        /// Response channel
        response_tx: Sender<ChainResult<WriteStatus>>,
    },
}

/// Mock chain controller: forwards every call to the test as a message and
/// blocks until the test answers.
#[derive(Clone)]
pub struct MockChainController(Sender<MockChainControllerMessage>);

impl MockChainController {
    /// Create a new mock along with the receiver the test drains.
    pub fn new_with_receiver() -> (Box<dyn ChainController>, ChainEventReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Box::new(MockChainController(tx)), ChainEventReceiver(rx))
    }
}

impl ChainEventReceiver {
    /// Wait for a message matching `filter_map`, up to `timeout`.
    /// Non-matching messages are discarded.
    pub fn wait_command<F, T>(&self, timeout: Duration, filter_map: F) -> Option<T>
    where
        F: Fn(MockChainControllerMessage) -> Option<T>,
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

impl ChainController for MockChainController {
    fn current_block(&self) -> Block {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockChainControllerMessage::CurrentBlock { response_tx })
            .expect("mock chain controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock chain controller")
    }

    fn block_id_at(&self, number: u64) -> Option<BlockId> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockChainControllerMessage::BlockIdAt {
                number,
                response_tx,
            })
            .expect("mock chain controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock chain controller")
    }

    fn write_block_with_state(
        &self,
        block: Block,
        output: ExecutionOutput,
    ) -> ChainResult<WriteStatus> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockChainControllerMessage::WriteBlockWithState {
                block,
                output,
                response_tx,
            })
            .expect("mock chain controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock chain controller")
    }

    fn clone_box(&self) -> Box<dyn ChainController> {
        Box::new(self.clone())
    }
}

/// Test tool to observe confirmation tracker calls
pub struct ConfirmationEventReceiver(pub Receiver<MockConfirmationTrackerMessage>);

/// Messages recorded by the confirmation tracker mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockConfirmationTrackerMessage {
    /// a locally produced block was registered
    Insert {
        /// block height
        number: u64,
        /// block id
        id: BlockId,
    },
    /// the low watermark advanced
    Shift {
        /// new watermark height
        number: u64,
    },
}

/// Mock confirmation tracker: records calls, never blocks.
#[derive(Clone)]
pub struct MockConfirmationTracker(Sender<MockConfirmationTrackerMessage>);

impl MockConfirmationTracker {
    /// Create a new mock along with the receiver the test drains.
    pub fn new_with_receiver() -> (Box<dyn ConfirmationTracker>, ConfirmationEventReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (
            Box::new(MockConfirmationTracker(tx)),
            ConfirmationEventReceiver(rx),
        )
    }
}

impl ConfirmationEventReceiver {
    /// Wait for a message matching `filter_map`, up to `timeout`.
    pub fn wait_command<F, T>(&self, timeout: Duration, filter_map: F) -> Option<T>
    where
        F: Fn(MockConfirmationTrackerMessage) -> Option<T>,
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

impl ConfirmationTracker for MockConfirmationTracker {
    fn insert(&self, number: u64, id: BlockId) {
        // the harness may already be gone during teardown
        let _ = self
            .0
            .send(MockConfirmationTrackerMessage::Insert { number, id });
    }

    fn shift(&self, number: u64) {
        let _ = self.0.send(MockConfirmationTrackerMessage::Shift { number });
    }

    fn clone_box(&self) -> Box<dyn ConfirmationTracker> {
        Box::new(self.clone())
    }
}
