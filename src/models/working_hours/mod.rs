// Working hours
// Host-supplied bounds for the day/week time grid

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Start/end of the bookable day as `"HH:MM"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkingHoursError {
    #[error("invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
    #[error("working hours must end after they start ({start} - {end})")]
    EmptyRange { start: String, end: String },
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::new("09:00", "17:00")
    }
}

impl WorkingHours {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse both bounds, requiring `end > start`.
    pub fn bounds(&self) -> Result<(NaiveTime, NaiveTime), WorkingHoursError> {
        let start = parse_hhmm(&self.start)?;
        let end = parse_hhmm(&self.end)?;
        if end <= start {
            return Err(WorkingHoursError::EmptyRange {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok((start, end))
    }

    pub fn validate(&self) -> Result<(), WorkingHoursError> {
        self.bounds().map(|_| ())
    }
}

/// Parse an `"HH:MM"` label.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, WorkingHoursError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| WorkingHoursError::InvalidTime(value.to_string()))
}

/// Format a time as an `"HH:MM"` label.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let (start, end) = WorkingHours::default().bounds().unwrap();
        assert_eq!(format_hhmm(start), "09:00");
        assert_eq!(format_hhmm(end), "17:00");
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let hours = WorkingHours::new("17:00", "09:00");
        assert!(matches!(
            hours.bounds(),
            Err(WorkingHoursError::EmptyRange { .. })
        ));
        assert!(WorkingHours::new("09:00", "09:00").validate().is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(
            parse_hhmm("nine"),
            Err(WorkingHoursError::InvalidTime("nine".to_string()))
        );
    }
}
