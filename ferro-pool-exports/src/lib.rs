// Copyright (c) 2025 FERRO LABS <dev@ferro.network>
//! Interface of the transaction pool consumed by the block production
//! pipeline, plus the new-transactions event type.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod controller_traits;
mod error;
mod events;

pub use controller_traits::PoolController;
pub use error::{PoolError, PoolResult};
pub use events::NewTransactionsEvent;

/// Test utils
#[cfg(feature = "test-exports")]
pub mod test_exports;
