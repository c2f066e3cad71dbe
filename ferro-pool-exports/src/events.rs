// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use ferro_models::Transaction;

/// Broadcast by the pool whenever transactions are first seen.
#[derive(Debug, Clone)]
pub struct NewTransactionsEvent {
    /// the newly admitted transactions
    pub transactions: Vec<Transaction>,
}
