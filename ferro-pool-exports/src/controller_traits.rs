// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module exports generic traits representing interfaces for interacting
//! with the transaction pool.

use crate::error::PoolResult;
use ferro_models::{Address, Transaction};
use std::collections::BTreeMap;

/// Interface to the transaction pool.
pub trait PoolController: Send + Sync {
    /// All currently executable transactions, grouped by origin account and
    /// sorted by ascending nonce within each group.
    fn pending(&self) -> PoolResult<BTreeMap<Address, Vec<Transaction>>>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn PoolController>`.
    fn clone_box(&self) -> Box<dyn PoolController>;
}

/// Allow cloning `Box<dyn PoolController>`
/// Uses `PoolController::clone_box` internally
impl Clone for Box<dyn PoolController> {
    fn clone(&self) -> Box<dyn PoolController> {
        self.clone_box()
    }
}
