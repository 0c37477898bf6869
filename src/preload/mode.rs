use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// When a bound anchor starts loading its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Immediately at bind time.
    Mount,
    /// On pointer-down or touch-start.
    Tap,
    /// On pointer-enter.
    #[default]
    Hover,
}

impl TriggerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerMode::Mount => "mount",
            TriggerMode::Tap => "tap",
            TriggerMode::Hover => "hover",
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTriggerModeError {
    #[error("unknown trigger mode '{0}', expected mount, tap or hover")]
    Unknown(String),
}

impl FromStr for TriggerMode {
    type Err = ParseTriggerModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mount" => Ok(TriggerMode::Mount),
            "tap" => Ok(TriggerMode::Tap),
            "hover" => Ok(TriggerMode::Hover),
            other => Err(ParseTriggerModeError::Unknown(other.to_string())),
        }
    }
}
