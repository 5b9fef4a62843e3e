//! Fixed-width durations: resample intervals and lookback windows.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::ConfigError;

/// Width of one resampled bucket.
///
/// Buckets are aligned to multiples of the interval since the Unix epoch,
/// so a 60 second interval produces buckets starting on whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(NonZeroU32);

impl Interval {
    /// One minute, the default resample interval.
    pub const MINUTE: Self = Self(NonZeroU32::MIN.saturating_add(59));

    /// Creates an interval from seconds, returning `None` for zero.
    #[must_use]
    pub const fn from_secs(seconds: u32) -> Option<Self> {
        match NonZeroU32::new(seconds) {
            Some(s) => Some(Self(s)),
            None => None,
        }
    }

    /// Returns the interval in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.0.get()
    }

    /// Returns the interval in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.0.get() as i64 * 1000
    }

    /// Returns the interval as a chrono duration.
    #[must_use]
    pub const fn as_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.0.get() as i64)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::MINUTE
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

impl FromStr for Interval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_seconds(s)
            .and_then(Self::from_secs)
            .ok_or_else(|| ConfigError::InvalidDuration(s.to_string()))
    }
}

/// Length of one lookback window, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowSpec(NonZeroU32);

impl WindowSpec {
    /// Creates a window spec from seconds, returning `None` for zero.
    #[must_use]
    pub const fn from_secs(seconds: u32) -> Option<Self> {
        match NonZeroU32::new(seconds) {
            Some(s) => Some(Self(s)),
            None => None,
        }
    }

    /// Returns the lookback duration in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.0.get()
    }

    /// Returns the lookback duration as a chrono duration.
    #[must_use]
    pub const fn as_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.0.get() as i64)
    }
}

impl std::fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.duration_seconds())
    }
}

impl From<NonZeroU32> for WindowSpec {
    fn from(seconds: NonZeroU32) -> Self {
        Self(seconds)
    }
}

impl FromStr for WindowSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_seconds(s)
            .and_then(Self::from_secs)
            .ok_or_else(|| ConfigError::InvalidDuration(s.to_string()))
    }
}

/// Parses `"90"`, `"90s"`, `"5m"`, `"m5"`, `"1h"`, `"h4"`, `"1d"` into seconds.
fn parse_seconds(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();
    if let Ok(secs) = s.parse::<u32>() {
        return Some(secs);
    }

    let (count, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => {
            let split = s.find(|c: char| c.is_ascii_digit())?;
            (&s[split..], &s[..split])
        }
        Some(split) => (&s[..split], &s[split..]),
        None => return None,
    };

    let multiplier = match unit {
        "s" | "sec" | "second" | "seconds" => 1,
        "m" | "min" | "minute" | "minutes" => 60,
        "h" | "hour" | "hours" => 3600,
        "d" | "day" | "days" => 86_400,
        _ => return None,
    };

    count.parse::<u32>().ok()?.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_default() {
        assert_eq!(Interval::default().seconds(), 60);
        assert_eq!(Interval::MINUTE.milliseconds(), 60_000);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!("60".parse::<Interval>().unwrap().seconds(), 60);
        assert_eq!("60s".parse::<Interval>().unwrap().seconds(), 60);
        assert_eq!("1m".parse::<Interval>().unwrap().seconds(), 60);
        assert_eq!("M5".parse::<Interval>().unwrap().seconds(), 300);
        assert_eq!("h4".parse::<Interval>().unwrap().seconds(), 14_400);
        assert_eq!("1d".parse::<Interval>().unwrap().seconds(), 86_400);
        assert!("0".parse::<Interval>().is_err());
        assert!("fortnight".parse::<Interval>().is_err());
        assert!("m".parse::<Interval>().is_err());
    }

    #[test]
    fn test_window_spec_parse() {
        assert_eq!("720".parse::<WindowSpec>().unwrap().duration_seconds(), 720);
        assert_eq!("25m".parse::<WindowSpec>().unwrap().duration_seconds(), 1500);
        assert_eq!(
            "0s".parse::<WindowSpec>(),
            Err(ConfigError::InvalidDuration("0s".to_string()))
        );
    }

    #[test]
    fn test_serde_transparent() {
        let spec: WindowSpec = serde_json::from_str("4000").unwrap();
        assert_eq!(spec.duration_seconds(), 4000);
        assert!(serde_json::from_str::<WindowSpec>("0").is_err());
        assert_eq!(serde_json::to_string(&Interval::MINUTE).unwrap(), "60");
    }
}
