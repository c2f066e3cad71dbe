// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// miner result
pub type MinerResult<T, E = MinerError> = core::result::Result<T, E>;

/// miner error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum MinerError {
    /// extra data too long: {0} bytes, maximum {1}
    ExtraDataTooLong(usize, usize),
    /// channel error: {0}
    ChannelError(String),
    /// generic error: {0}
    GenericError(String),
}
