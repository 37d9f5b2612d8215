// Settings module
// Host configuration for the scheduling grid

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::view_mode::ViewMode;
use crate::models::working_hours::{WorkingHours, WorkingHoursError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub working_hours: WorkingHours,
    pub slot_step_minutes: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub default_view: ViewMode,
    pub gesture: GestureConfig,
    pub zoom: ZoomConfig,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            slot_step_minutes: 30,
            first_day_of_week: 1, // Monday
            default_view: ViewMode::Week,
            gesture: GestureConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

/// Gesture recognition thresholds. Distances in logical pixels, times in ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement below this is treated as finger jitter
    pub jitter_px: f32,
    pub double_tap_window_ms: u64,
    pub double_tap_tolerance_px: f32,
    pub long_press_ms: u64,
    pub swipe_min_distance_px: f32,
    /// Pixels per millisecond
    pub swipe_min_velocity: f32,
    pub swipe_max_vertical_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            jitter_px: 8.0,
            double_tap_window_ms: 300,
            double_tap_tolerance_px: 30.0,
            long_press_ms: 500,
            swipe_min_distance_px: 50.0,
            swipe_min_velocity: 0.3,
            swipe_max_vertical_px: 75.0,
        }
    }
}

/// Pinch scale thresholds for switching views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub month_to_week: f32,
    pub week_to_day: f32,
    pub day_to_week: f32,
    pub week_to_month: f32,
    /// Distance scale must retreat past a threshold before it re-arms
    pub hysteresis: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            month_to_week: 1.2,
            week_to_day: 1.5,
            day_to_week: 0.8,
            week_to_month: 0.6,
            hysteresis: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsValidationError {
    #[error(transparent)]
    WorkingHours(#[from] WorkingHoursError),
    #[error("slot step must be between 1 and 240 minutes, got {0}")]
    SlotStep(u32),
    #[error("first day of week must be 0-6, got {0}")]
    FirstDayOfWeek(u8),
    #[error("gesture threshold '{0}' must be positive")]
    GestureThreshold(&'static str),
    #[error("zoom thresholds must satisfy zoom-out < 1 < zoom-in")]
    ZoomThresholds,
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        self.working_hours.validate()?;

        if self.slot_step_minutes == 0 || self.slot_step_minutes > 240 {
            return Err(SettingsValidationError::SlotStep(self.slot_step_minutes));
        }
        if self.first_day_of_week > 6 {
            return Err(SettingsValidationError::FirstDayOfWeek(self.first_day_of_week));
        }

        self.gesture.validate()?;
        self.zoom.validate()
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let positive = [
            ("jitter_px", self.jitter_px),
            ("double_tap_tolerance_px", self.double_tap_tolerance_px),
            ("swipe_min_distance_px", self.swipe_min_distance_px),
            ("swipe_min_velocity", self.swipe_min_velocity),
            ("swipe_max_vertical_px", self.swipe_max_vertical_px),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(SettingsValidationError::GestureThreshold(name));
        }
        if self.long_press_ms == 0 {
            return Err(SettingsValidationError::GestureThreshold("long_press_ms"));
        }
        if self.double_tap_window_ms == 0 {
            return Err(SettingsValidationError::GestureThreshold("double_tap_window_ms"));
        }
        Ok(())
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let zoom_in_ok = self.month_to_week > 1.0 && self.week_to_day > 1.0;
        let zoom_out_ok = self.day_to_week > 0.0
            && self.day_to_week < 1.0
            && self.week_to_month > 0.0
            && self.week_to_month < 1.0;
        if !zoom_in_ok || !zoom_out_ok || self.hysteresis < 0.0 {
            return Err(SettingsValidationError::ZoomThresholds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GridSettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_step() {
        let settings = GridSettings {
            slot_step_minutes: 0,
            ..GridSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::SlotStep(0))
        );
    }

    #[test]
    fn test_invalid_first_day() {
        let settings = GridSettings {
            first_day_of_week: 7,
            ..GridSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::FirstDayOfWeek(7))
        );
    }

    #[test]
    fn test_invalid_gesture_threshold() {
        let mut settings = GridSettings::default();
        settings.gesture.swipe_min_velocity = 0.0;
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::GestureThreshold("swipe_min_velocity"))
        );
    }

    #[test]
    fn test_inverted_zoom_thresholds() {
        let mut settings = GridSettings::default();
        settings.zoom.day_to_week = 1.3;
        assert_eq!(
            settings.validate(),
            Err(SettingsValidationError::ZoomThresholds)
        );
    }
}
