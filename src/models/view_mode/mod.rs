// View modes
// Grid shapes the scheduling grid can render

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calendar view modes, ordered from most zoomed-in to most zoomed-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode '{0}' (expected day, week or month)")]
pub struct ParseViewModeError(String);

impl ViewMode {
    /// The next more detailed view, if any.
    pub fn zoom_in(self) -> Option<ViewMode> {
        match self {
            ViewMode::Month => Some(ViewMode::Week),
            ViewMode::Week => Some(ViewMode::Day),
            ViewMode::Day => None,
        }
    }

    /// The next broader view, if any.
    pub fn zoom_out(self) -> Option<ViewMode> {
        match self {
            ViewMode::Day => Some(ViewMode::Week),
            ViewMode::Week => Some(ViewMode::Month),
            ViewMode::Month => None,
        }
    }

    /// Whether the view shows working-hour time slots.
    pub fn has_time_grid(self) -> bool {
        !matches!(self, ViewMode::Month)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(ParseViewModeError(other.to_string())),
        }
    }
}
