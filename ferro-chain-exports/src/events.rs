// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use ferro_models::Block;

/// Broadcast by the chain store whenever the canonical head changes.
#[derive(Debug, Clone)]
pub struct ChainHeadEvent {
    /// the new canonical head
    pub block: Block,
}
