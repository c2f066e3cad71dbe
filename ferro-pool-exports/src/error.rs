// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// pool result
pub type PoolResult<T, E = PoolError> = core::result::Result<T, E>;

/// pool error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum PoolError {
    /// generic pool error: {0}
    GenericError(String),
}
