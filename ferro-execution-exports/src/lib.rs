// Copyright (c) 2025 FERRO LABS <dev@ferro.network>
//! Interface of the state-transition engine consumed by the block
//! production pipeline to apply candidate transactions.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod controller_traits;
mod error;

pub use controller_traits::ExecutionController;
pub use error::{ExecutionError, ExecutionResult};

/// Test utils
#[cfg(feature = "test-exports")]
pub mod test_exports;
