//! Shift start time carried by a simulation request
//!
//! The start time is checked for its `HH:MM` shape only. It is recorded on
//! the run report but does not influence allocation or economics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("start time must be in HH:MM format, got '{0}'")]
pub struct StartTimeError(pub String);

/// A two-digit hour and two-digit minute, as supplied by the caller.
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::core::StartTime;
///
/// let start: StartTime = "09:30".parse().unwrap();
/// assert_eq!(start.hour(), 9);
/// assert_eq!(start.minute(), 30);
/// assert_eq!(start.to_string(), "09:30");
/// assert!("9:30".parse::<StartTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartTime {
    hour: u8,
    minute: u8,
}

impl StartTime {
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for StartTime {
    type Err = StartTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !shaped {
            return Err(StartTimeError(s.to_string()));
        }
        let digit = |i: usize| bytes[i] - b'0';
        Ok(Self {
            hour: digit(0) * 10 + digit(1),
            minute: digit(3) * 10 + digit(4),
        })
    }
}

impl TryFrom<String> for StartTime {
    type Error = StartTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StartTime> for String {
    fn from(value: StartTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
