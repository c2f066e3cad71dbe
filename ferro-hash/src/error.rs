// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// hash result
pub type HashResult<T, E = FerroHashError> = core::result::Result<T, E>;

/// hash error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum FerroHashError {
    /// not base58check encoded: {0}
    NotBs58CheckEncoded(String),
    /// wrong size for hash bytes: expected {0}, got {1}
    WrongHashSize(usize, usize),
}
