//! Budget reset timestamps and the countdown shown next to the spend.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

/// Naive layouts tried after RFC 3339. `%.f` also accepts no fraction.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a `budget_reset_at` value into UTC.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, offsets, fractional seconds)
/// and the same layout without a zone or with a space separator, read as
/// UTC. Returns `None` for anything else, including the empty string.
pub fn parse_reset_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Time left until the budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCountdown {
    /// Empty or unparseable timestamp.
    Unknown,
    /// The reset time has passed or is less than a minute away.
    Resetting,
    /// At least one whole minute remains.
    Remaining(Duration),
}

impl ResetCountdown {
    pub fn until(reset_at: &str, now: DateTime<Utc>) -> Self {
        let Some(reset) = parse_reset_time(reset_at) else {
            return ResetCountdown::Unknown;
        };
        match (reset - now).to_std() {
            Ok(left) if left.as_secs() >= 60 => ResetCountdown::Remaining(left),
            _ => ResetCountdown::Resetting,
        }
    }
}

impl fmt::Display for ResetCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetCountdown::Unknown => f.write_str("unknown"),
            ResetCountdown::Resetting => f.write_str("resetting"),
            ResetCountdown::Remaining(left) => {
                let total_minutes = left.as_secs() / 60;
                let days = total_minutes / (24 * 60);
                let hours = (total_minutes / 60) % 24;
                let minutes = total_minutes % 60;
                if days > 0 {
                    write!(f, "{days}d{hours}h")
                } else if hours > 0 {
                    write!(f, "{hours}h")
                } else {
                    write!(f, "{minutes}m")
                }
            }
        }
    }
}

impl Serialize for ResetCountdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
