// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// execution result
pub type ExecutionResult<T, E = ExecutionError> = core::result::Result<T, E>;

/// execution error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum ExecutionError {
    /// transaction application failed: {0}
    ApplyError(String),
    /// generic execution error: {0}
    GenericError(String),
}
