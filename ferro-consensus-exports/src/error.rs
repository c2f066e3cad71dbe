// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// consensus result
pub type ConsensusResult<T, E = ConsensusError> = core::result::Result<T, E>;

/// consensus error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum ConsensusError {
    /// header preparation failed: {0}
    PrepareError(String),
    /// proof search failed: {0}
    SealError(String),
    /// block finalization failed: {0}
    FinalizeError(String),
}
