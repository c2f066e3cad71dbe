// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module exports generic traits representing interfaces for interacting
//! with the state-transition engine.

use crate::error::ExecutionResult;
use ferro_models::{Address, BlockHeader, Receipt, Transaction};

/// Interface to the state-transition engine.
pub trait ExecutionController: Send + Sync {
    /// Apply one transaction against the in-progress block described by
    /// `header`, crediting fees to `coinbase` when one is set. A failure
    /// only concerns this transaction; the engine state stays consistent
    /// for the following applications of the same cycle.
    fn apply_transaction(
        &self,
        header: &BlockHeader,
        coinbase: Option<&Address>,
        tx: &Transaction,
    ) -> ExecutionResult<Receipt>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn ExecutionController>`.
    fn clone_box(&self) -> Box<dyn ExecutionController>;
}

/// Allow cloning `Box<dyn ExecutionController>`
/// Uses `ExecutionController::clone_box` internally
impl Clone for Box<dyn ExecutionController> {
    fn clone(&self) -> Box<dyn ExecutionController> {
        self.clone_box()
    }
}
