use std::ops::RangeInclusive;

use chrono::{Datelike, Utc};
use serde::Deserialize;

/// ERA5 starts in January 1940.
pub const FIRST_ERA5_YEAR: i32 = 1940;

/// An inclusive range of years, e.g. `{start: 1993, end: 2023}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, YearRangeError> {
        if start > end {
            return Err(YearRangeError::Reversed { start, end });
        }
        if start < FIRST_ERA5_YEAR {
            return Err(YearRangeError::BeforeRecord { start });
        }
        let current = Utc::now().year();
        if end > current {
            return Err(YearRangeError::InFuture { end, current });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Ascending.
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years. Never zero.
    pub fn count(&self) -> usize {
        (self.end - self.start + 1) as usize
    }
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = YearRangeError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, derive_more::Display)]
pub enum YearRangeError {
    #[display("start year {start} is after end year {end}")]
    Reversed { start: i32, end: i32 },
    #[display("start year {start} is before the first ERA5 year (1940)")]
    BeforeRecord { start: i32 },
    #[display("end year {end} is after the current year ({current})")]
    InFuture { end: i32, current: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_decades() -> anyhow::Result<()> {
        let years = YearRange::new(1993, 2023)?;
        assert_eq!(years.count(), 31);
        assert_eq!(years.iter().next(), Some(1993));
        assert_eq!(years.iter().last(), Some(2023));
        Ok(())
    }

    #[test]
    fn test_single_year() -> anyhow::Result<()> {
        let years = YearRange::new(2001, 2001)?;
        assert_eq!(years.iter().collect::<Vec<_>>(), vec![2001]);
        Ok(())
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            YearRange::new(2023, 1993),
            Err(YearRangeError::Reversed {
                start: 2023,
                end: 1993
            })
        );
        assert_eq!(
            YearRange::new(1900, 1993),
            Err(YearRangeError::BeforeRecord { start: 1900 })
        );
        assert!(matches!(
            YearRange::new(1993, 3000),
            Err(YearRangeError::InFuture { end: 3000, .. })
        ));
        assert_eq!(
            YearRangeError::BeforeRecord { start: 1900 }.to_string(),
            "start year 1900 is before the first ERA5 year (1940)"
        );
    }

    #[test]
    fn test_deserialize() -> anyhow::Result<()> {
        let years: YearRange = serde_yaml::from_str("{start: 1993, end: 2023}")?;
        assert_eq!(years, YearRange::new(1993, 2023)?);
        assert!(serde_yaml::from_str::<YearRange>("{start: 2023, end: 1993}").is_err());
        Ok(())
    }
}
