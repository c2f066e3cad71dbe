// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// models result
pub type ModelsResult<T, E = ModelsError> = core::result::Result<T, E>;

/// models error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum ModelsError {
    /// hashing error: {0}
    HashError(#[from] ferro_hash::FerroHashError),
    /// address parse error: {0}
    AddressParseError(String),
    /// id parse error: {0}
    IdParseError(String),
    /// checked operation error: {0}
    CheckedOperationError(String),
}
