//! Haptic pulse categories and backends.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HapticCategory {
    Select,
    DragStart,
    DragEndSuccess,
    DragEndFailure,
    Swipe,
    LongPress,
}

impl HapticCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticCategory::Select => "select",
            HapticCategory::DragStart => "drag-start",
            HapticCategory::DragEndSuccess => "drag-end-success",
            HapticCategory::DragEndFailure => "drag-end-failure",
            HapticCategory::Swipe => "swipe",
            HapticCategory::LongPress => "long-press",
        }
    }

    /// Vibration pattern in milliseconds, alternating on/off.
    pub fn pattern(&self) -> &'static [u32] {
        match self {
            HapticCategory::Select => &[10],
            HapticCategory::DragStart => &[20],
            HapticCategory::DragEndSuccess => &[10, 50, 10],
            HapticCategory::DragEndFailure => &[50, 100, 50],
            HapticCategory::Swipe => &[15],
            HapticCategory::LongPress => &[40],
        }
    }
}

impl fmt::Display for HapticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device vibration backend. Fire-and-forget; errors are logged and dropped
/// by the feedback sink.
pub trait HapticSink: Send + Sync {
    fn pulse(&self, category: HapticCategory) -> Result<()>;
}

/// For hosts without a vibration motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl HapticSink for NoopHaptics {
    fn pulse(&self, _category: HapticCategory) -> Result<()> {
        Ok(())
    }
}

/// Writes pulses to the debug log instead of a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl HapticSink for LogHaptics {
    fn pulse(&self, category: HapticCategory) -> Result<()> {
        log::debug!("haptic pulse {} {:?}", category, category.pattern());
        Ok(())
    }
}
