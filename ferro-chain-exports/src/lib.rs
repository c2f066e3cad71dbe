// Copyright (c) 2025 FERRO LABS <dev@ferro.network>
//! Interface of the chain store consumed by the block production pipeline,
//! plus the chain-head event type and the confirmation tracking contract.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod controller_traits;
mod error;
mod events;

pub use controller_traits::{ChainController, ConfirmationTracker, WriteStatus};
pub use error::{ChainError, ChainResult};
pub use events::ChainHeadEvent;

/// Test utils
#[cfg(feature = "test-exports")]
pub mod test_exports;
