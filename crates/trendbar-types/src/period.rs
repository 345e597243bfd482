//! Bar period definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{PeriodParseError, Timestamp};

/// Fixed duration of a bar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 1-minute bars.
    M1,
    /// 1-hour bars.
    H1,
    /// Daily bars.
    D1,
}

impl Period {
    /// Number of periods in the catalogue.
    pub const COUNT: usize = 3;

    /// Returns the window duration in seconds.
    #[must_use]
    pub const fn seconds(&self) -> Timestamp {
        match self {
            Self::M1 => 60,
            Self::H1 => 3_600,
            Self::D1 => 86_400,
        }
    }

    /// Returns the period as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::H1 => "h1",
            Self::D1 => "d1",
        }
    }

    /// Position of the period in [`Period::all`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::M1 => 0,
            Self::H1 => 1,
            Self::D1 => 2,
        }
    }

    /// Returns all periods, shortest first.
    ///
    /// Every component that processes "all periods" iterates in this order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::M1, Self::H1, Self::D1]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m1" | "1m" | "minute" | "minute1" => Ok(Self::M1),
            "h1" | "1h" | "hour" | "hour1" => Ok(Self::H1),
            "d1" | "1d" | "day" | "day1" | "daily" => Ok(Self::D1),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_seconds() {
        assert_eq!(Period::M1.seconds(), 60);
        assert_eq!(Period::H1.seconds(), 3600);
        assert_eq!(Period::D1.seconds(), 86400);
    }

    #[test]
    fn test_period_order_is_stable() {
        assert_eq!(Period::all(), &[Period::M1, Period::H1, Period::D1]);
        for (i, period) in Period::all().iter().enumerate() {
            assert_eq!(period.index(), i);
        }
        assert_eq!(Period::all().len(), Period::COUNT);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("m1".parse::<Period>().unwrap(), Period::M1);
        assert_eq!("1H".parse::<Period>().unwrap(), Period::H1);
        assert_eq!("daily".parse::<Period>().unwrap(), Period::D1);
        assert!("m5".parse::<Period>().is_err());
    }
}
