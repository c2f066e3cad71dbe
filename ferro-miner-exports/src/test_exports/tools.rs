// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use ferro_hash::Hash;
use ferro_models::{Address, Block, BlockHeader, BlockId, Receipt, Transaction};

/// Chain id used by the test tools.
pub const TEST_CHAIN_ID: u64 = 1337;

/// Create a transaction bound to [TEST_CHAIN_ID].
pub fn create_test_transaction(origin: Address, nonce: u64, price: u64) -> Transaction {
    Transaction {
        origin,
        nonce,
        price,
        chain_id: Some(TEST_CHAIN_ID),
        payload: Vec::new(),
    }
}

/// Create an empty block at the given height and timestamp, parented to a
/// synthetic id derived from the height.
pub fn create_test_block(number: u64, timestamp: u64) -> Block {
    Block::new(
        BlockHeader {
            parent_hash: BlockId::new(Hash::compute_from(&number.to_be_bytes())),
            number,
            timestamp,
            coinbase: None,
            extra_data: Vec::new(),
            difficulty: 1,
            nonce: 0,
        },
        Vec::new(),
    )
}

/// Create a receipt for the given transaction.
pub fn create_test_receipt(tx: &Transaction) -> Receipt {
    Receipt {
        tx_id: tx.id(),
        gas_used: 21_000,
        post_state: Hash::compute_from(tx.id().hash().to_bytes()),
    }
}
