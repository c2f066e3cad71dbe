// Copyright (c) 2025 FERRO LABS <dev@ferro.network>
//! Unsigned time management
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod error;
pub use error::TimeError;

use serde::{Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Time structure used everywhere.
/// milliseconds since 01/01/1970.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Time(u64);

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_millis())
    }
}

impl TryFrom<Duration> for Time {
    type Error = TimeError;

    /// Conversion from `std::time::Duration`.
    /// ```
    /// # use std::time::Duration;
    /// # use std::convert::TryFrom;
    /// # use ferro_time::Time;
    /// let duration: Duration = Duration::from_millis(42);
    /// let time: Time = Time::from_millis(42);
    /// assert_eq!(time, Time::try_from(duration).unwrap());
    /// ```
    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Ok(Time(
            value
                .as_millis()
                .try_into()
                .map_err(|_| TimeError::ConversionError)?,
        ))
    }
}

impl From<Time> for Duration {
    /// ```
    /// # use std::time::Duration;
    /// # use ferro_time::Time;
    /// let time: Time = Time::from_millis(42);
    /// let duration: Duration = time.into();
    /// assert_eq!(duration, Duration::from_millis(42));
    /// ```
    fn from(value: Time) -> Self {
        Duration::from_millis(value.to_millis())
    }
}

impl Time {
    /// Smallest time interval
    pub const EPSILON: Time = Time(1);

    /// Gets the current time from the system clock.
    pub fn now() -> Result<Self, TimeError> {
        let now: u64 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| TimeError::ClockError(err.to_string()))?
            .as_millis()
            .try_into()
            .map_err(|_| TimeError::TimeOverflowError)?;
        Ok(Time(now))
    }

    /// Create a time from milliseconds since the epoch.
    /// ```
    /// # use ferro_time::Time;
    /// let time: Time = Time::from_millis(42);
    /// ```
    pub const fn from_millis(millis: u64) -> Self {
        Time(millis)
    }

    /// Create a time from whole seconds since the epoch.
    /// ```
    /// # use ferro_time::Time;
    /// assert_eq!(Time::from_seconds(3), Time::from_millis(3000));
    /// ```
    pub const fn from_seconds(seconds: u64) -> Self {
        Time(seconds.saturating_mul(1000))
    }

    /// Time in milliseconds since the epoch.
    pub const fn to_millis(&self) -> u64 {
        self.0
    }

    /// Time in whole seconds since the epoch, rounded down.
    /// ```
    /// # use ferro_time::Time;
    /// assert_eq!(Time::from_millis(3999).to_seconds(), 3);
    /// ```
    pub const fn to_seconds(&self) -> u64 {
        self.0 / 1000
    }

    /// ```
    /// # use ferro_time::Time;
    /// let time_1: Time = Time::from_millis(42);
    /// let time_2: Time = Time::from_millis(7);
    /// assert_eq!(time_1.checked_add(time_2).unwrap(), Time::from_millis(49));
    /// ```
    pub fn checked_add(self, t: Time) -> Result<Self, TimeError> {
        self.0
            .checked_add(t.0)
            .ok_or(TimeError::TimeOverflowError)
            .map(Time)
    }

    /// ```
    /// # use ferro_time::Time;
    /// let time_1: Time = Time::from_millis(42);
    /// let time_2: Time = Time::from_millis(7);
    /// assert_eq!(time_1.checked_sub(time_2).unwrap(), Time::from_millis(35));
    /// ```
    pub fn checked_sub(self, t: Time) -> Result<Self, TimeError> {
        self.0
            .checked_sub(t.0)
            .ok_or(TimeError::TimeOverflowError)
            .map(Time)
    }

    /// Saturating addition.
    pub fn saturating_add(self, t: Time) -> Self {
        Time(self.0.saturating_add(t.0))
    }

    /// Saturating subtraction.
    /// ```
    /// # use ferro_time::Time;
    /// let time_1: Time = Time::from_millis(7);
    /// let time_2: Time = Time::from_millis(42);
    /// assert_eq!(time_1.saturating_sub(time_2), Time::from_millis(0));
    /// ```
    pub fn saturating_sub(self, t: Time) -> Self {
        Time(self.0.saturating_sub(t.0))
    }

    /// Estimate the `Instant` at which this time will be (or was) reached,
    /// relative to the system clock reading taken inside the call.
    pub fn estimate_instant(self) -> Result<Instant, TimeError> {
        let (inst, now) = (Instant::now(), Time::now()?);
        if let Ok(to_wait) = self.checked_sub(now) {
            inst.checked_add(to_wait.into())
                .ok_or(TimeError::TimeOverflowError)
        } else {
            // already in the past
            Ok(inst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_conversion() {
        assert_eq!(Time::from_seconds(3).to_millis(), 3000);
        assert_eq!(Time::from_millis(2500).to_seconds(), 2);
    }

    #[test]
    fn test_checked_ops() {
        let t = Time::from_millis(u64::MAX);
        assert_eq!(
            t.checked_add(Time::EPSILON),
            Err(TimeError::TimeOverflowError)
        );
        assert_eq!(
            Time::from_millis(0).checked_sub(Time::EPSILON),
            Err(TimeError::TimeOverflowError)
        );
    }

    #[test]
    fn test_estimate_instant_past_does_not_panic() {
        let past = Time::from_millis(0);
        assert!(past.estimate_instant().is_ok());
    }
}
