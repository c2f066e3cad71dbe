// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use ferro_chain_exports::ChainController;
use ferro_models::{Block, BlockHeader, Transaction};

use crate::{ConsensusController, ConsensusResult};

/// Test tool to observe and answer consensus engine calls
pub struct ConsensusEventReceiver(pub Receiver<MockConsensusControllerMessage>);

/// List of possible messages you can receive from the mock.
/// Each variant corresponds to a unique method in `ConsensusController`;
/// every variant waits for an answer on its `response_tx` field.
#[derive(Debug)]
pub enum MockConsensusControllerMessage {
    /// A candidate header is being prepared; answer with the enriched header.
    Prepare {
        /// the header as assembled by the pipeline
        header: BlockHeader,
        /// Response channel
        response_tx: Sender<ConsensusResult<BlockHeader>>,
    },
    /// A proof search was submitted. The mock resolves with the answer sent
    /// on `response_tx`, or with `Ok(None)` if `cancel` fires first.
    Seal {
        /// the finalized block candidate
        block: Block,
        /// observer clone of the cancel signal handed to the engine
        cancel: Receiver<()>,
        /// Response channel
        response_tx: Sender<ConsensusResult<Option<Block>>>,
    },
    /// A block is being finalized; answer with the sealable block.
    Finalize {
        /// header of the candidate
        header: BlockHeader,
        /// transactions of the candidate
        transactions: Vec<Transaction>,
        /// Response channel
        response_tx: Sender<ConsensusResult<Block>>,
    },
}

/// Mock consensus engine: forwards every call to the test as a message and
/// blocks until the test answers (or, for seal, until cancellation).
#[derive(Clone)]
pub struct MockConsensusController(Sender<MockConsensusControllerMessage>);

impl MockConsensusController {
    /// Create a new mock along with the receiver the test drains.
    pub fn new_with_receiver() -> (Box<dyn ConsensusController>, ConsensusEventReceiver) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (
            Box::new(MockConsensusController(tx)),
            ConsensusEventReceiver(rx),
        )
    }
}

impl ConsensusEventReceiver {
    /// Wait for a message matching `filter_map`, up to `timeout`.
    /// Non-matching messages are discarded.
    pub fn wait_command<F, T>(&self, timeout: Duration, filter_map: F) -> Option<T>
    where
        F: Fn(MockConsensusControllerMessage) -> Option<T>,
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

impl ConsensusController for MockConsensusController {
    fn prepare(
        &self,
        _chain: &dyn ChainController,
        header: &mut BlockHeader,
    ) -> ConsensusResult<()> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockConsensusControllerMessage::Prepare {
                header: header.clone(),
                response_tx,
            })
            .expect("mock consensus controller receiver dropped");
        let prepared = response_rx
            .recv()
            .expect("no response from mock consensus controller")?;
        *header = prepared;
        Ok(())
    }

    fn seal(
        &self,
        _chain: &dyn ChainController,
        block: Block,
        cancel: Receiver<()>,
    ) -> ConsensusResult<Option<Block>> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockConsensusControllerMessage::Seal {
                block,
                cancel: cancel.clone(),
                response_tx,
            })
            .expect("mock consensus controller receiver dropped");
        crossbeam_channel::select! {
            recv(response_rx) -> res => match res {
                Ok(answer) => answer,
                // the test dropped the response channel without answering
                Err(_) => Ok(None),
            },
            // message or disconnect both mean the attempt was superseded
            recv(cancel) -> _ => Ok(None),
        }
    }

    fn finalize(
        &self,
        header: &BlockHeader,
        transactions: &[Transaction],
    ) -> ConsensusResult<Block> {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        self.0
            .send(MockConsensusControllerMessage::Finalize {
                header: header.clone(),
                transactions: transactions.to_vec(),
                response_tx,
            })
            .expect("mock consensus controller receiver dropped");
        response_rx
            .recv()
            .expect("no response from mock consensus controller")
    }

    fn clone_box(&self) -> Box<dyn ConsensusController> {
        Box::new(self.clone())
    }
}
