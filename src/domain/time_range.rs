use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Window of observations fed into an analysis.
/// Mirrors the dashboard's time-range selector: everything, or the most recent N points.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    #[default]
    All,
    Last(usize),
}

impl TimeRange {
    /// (start, end) indices into a series of `len` observations. `end` is exclusive.
    pub fn indices(&self, len: usize) -> (usize, usize) {
        match self {
            TimeRange::All => (0, len),
            TimeRange::Last(n) => (len.saturating_sub(*n), len),
        }
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(TimeRange::All);
        }
        let n: usize = trimmed
            .parse()
            .map_err(|_| anyhow!("Invalid time range '{}': expected 'all' or a count", s))?;
        if n == 0 {
            bail!("Time range must cover at least one observation");
        }
        Ok(TimeRange::Last(n))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeRange::All => write!(f, "all"),
            TimeRange::Last(n) => write!(f, "last {}", n),
        }
    }
}
