// Slot keys
// Composite date + time identifiers for drop targets

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies a drop target cell.
///
/// Day/week time-slot cells carry a time; month day cells carry only a date.
/// Textual form is `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid slot key '{0}'")]
pub struct SlotKeyError(String);

impl SlotKey {
    pub fn slot(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    pub fn is_day_cell(&self) -> bool {
        self.time.is_none()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{}T{}", self.date.format("%Y-%m-%d"), time.format("%H:%M")),
            None => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for SlotKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SlotKeyError(s.to_string());
        let (date_part, time_part) = match s.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (s, None),
        };
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| err())?;
        let time = time_part
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| err()))
            .transpose()?;
        Ok(Self { date, time })
    }
}
