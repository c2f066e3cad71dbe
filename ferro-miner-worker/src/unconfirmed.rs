// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::collections::VecDeque;
use std::sync::Arc;

use ferro_chain_exports::{ChainController, ConfirmationTracker};
use ferro_models::BlockId;
use parking_lot::Mutex;
use tracing::{info, warn};

/// One locally produced block awaiting confirmation.
struct UnconfirmedBlock {
    number: u64,
    id: BlockId,
}

/// Ring of locally produced blocks pending canonical confirmation. Once the
/// chain has advanced `depth` blocks past one of them, the block is checked
/// against the canonical chain and its fate is logged.
#[derive(Clone)]
pub struct UnconfirmedBlocks {
    chain: Box<dyn ChainController>,
    depth: u64,
    blocks: Arc<Mutex<VecDeque<UnconfirmedBlock>>>,
}

impl UnconfirmedBlocks {
    /// Create a tracker reading canonical ids from `chain`, confirming
    /// blocks `depth` descendants deep.
    pub fn new(chain: Box<dyn ChainController>, depth: u64) -> Self {
        UnconfirmedBlocks {
            chain,
            depth,
            blocks: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

impl ConfirmationTracker for UnconfirmedBlocks {
    fn insert(&self, number: u64, id: BlockId) {
        self.blocks
            .lock()
            .push_back(UnconfirmedBlock { number, id });
        info!("🔨 mined potential block: number={} id={}", number, id);
    }

    fn shift(&self, number: u64) {
        let mut blocks = self.blocks.lock();
        while let Some(front) = blocks.front() {
            if front.number + self.depth > number {
                break;
            }
            let matured = match blocks.pop_front() {
                Some(matured) => matured,
                None => break,
            };
            match self.chain.block_id_at(matured.number) {
                Some(canonical) if canonical == matured.id => {
                    info!(
                        "🔗 block reached canonical chain: number={} id={}",
                        matured.number, matured.id
                    );
                }
                Some(_) => {
                    info!(
                        "⑂ block became a side fork: number={} id={}",
                        matured.number, matured.id
                    );
                }
                None => {
                    warn!(
                        "Failed to retrieve header of mined block: number={} id={}",
                        matured.number, matured.id
                    );
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn ConfirmationTracker> {
        Box::new(self.clone())
    }
}
