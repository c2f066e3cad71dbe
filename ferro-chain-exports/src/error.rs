// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// chain result
pub type ChainResult<T, E = ChainError> = core::result::Result<T, E>;

/// chain error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum ChainError {
    /// storage write failed: {0}
    WriteError(String),
    /// generic chain error: {0}
    GenericError(String),
}
