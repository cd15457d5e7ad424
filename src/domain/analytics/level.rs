use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analytics verbosity. Used both as the configured threshold and as the
/// level of an individual event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsLevel {
    #[default]
    None = 0,
    Critical = 1,
    Verbose = 2,
}

impl AnalyticsLevel {
    /// Maps a raw numeric level. Values outside 0..=2 are unknown.
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            0 => Some(AnalyticsLevel::None),
            1 => Some(AnalyticsLevel::Critical),
            2 => Some(AnalyticsLevel::Verbose),
            _ => None,
        }
    }

    /// Whether an event at raw `event_level` passes this threshold.
    pub fn admits(self, event_level: u8) -> bool {
        match AnalyticsLevel::from_u8(event_level) {
            Some(AnalyticsLevel::None) | None => false,
            Some(level) => self != AnalyticsLevel::None && level <= self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsLevel::None => "none",
            AnalyticsLevel::Critical => "critical",
            AnalyticsLevel::Verbose => "verbose",
        }
    }
}

impl From<AnalyticsLevel> for u8 {
    fn from(level: AnalyticsLevel) -> Self {
        level as u8
    }
}

impl fmt::Display for AnalyticsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(AnalyticsLevel::None),
            "critical" | "1" => Ok(AnalyticsLevel::Critical),
            "verbose" | "2" => Ok(AnalyticsLevel::Verbose),
            other => Err(format!("unknown analytics level: {}", other)),
        }
    }
}
