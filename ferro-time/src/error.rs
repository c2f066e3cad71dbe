// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use displaydoc::Display;
use thiserror::Error;

/// time error
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// time overflow error
    TimeOverflowError,
    /// conversion error
    ConversionError,
    /// could not read system clock: {0}
    ClockError(String),
}
