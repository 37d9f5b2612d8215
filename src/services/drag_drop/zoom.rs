//! Pinch-to-change-view thresholds with latching.

use crate::models::settings::ZoomConfig;
use crate::models::view_mode::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Latch {
    /// Fired by spreading past `threshold`
    In { threshold: f32 },
    /// Fired by pinching below `threshold`
    Out { threshold: f32 },
}

/// Decides view switches from a pinch scale stream.
///
/// After a switch fires, the latch stays closed until the scale retreats past
/// the crossed threshold by the hysteresis band, so a scale hovering around a
/// boundary switches once. [`reset`](Self::reset) at every pinch start.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomLatch {
    config: ZoomConfig,
    latch: Option<Latch>,
}

impl ZoomLatch {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            latch: None,
        }
    }

    pub fn reset(&mut self) {
        self.latch = None;
    }

    pub fn is_latched(&self) -> bool {
        self.latch.is_some()
    }

    /// Returns the view to switch to, if this scale sample crosses a threshold.
    pub fn update(&mut self, view: ViewMode, scale: f32) -> Option<ViewMode> {
        let band = self.config.hysteresis;
        if let Some(latch) = self.latch {
            let rearmed = match latch {
                Latch::In { threshold } => scale < threshold - band,
                Latch::Out { threshold } => scale > threshold + band,
            };
            if !rearmed {
                return None;
            }
            log::debug!("Zoom latch re-armed at scale {}", scale);
            self.latch = None;
        }

        let cfg = &self.config;
        let (next, latch) = match view {
            ViewMode::Month if scale > cfg.month_to_week => (
                ViewMode::Week,
                Latch::In {
                    threshold: cfg.month_to_week,
                },
            ),
            ViewMode::Week if scale > cfg.week_to_day => (
                ViewMode::Day,
                Latch::In {
                    threshold: cfg.week_to_day,
                },
            ),
            ViewMode::Week if scale < cfg.week_to_month => (
                ViewMode::Month,
                Latch::Out {
                    threshold: cfg.week_to_month,
                },
            ),
            ViewMode::Day if scale < cfg.day_to_week => (
                ViewMode::Week,
                Latch::Out {
                    threshold: cfg.day_to_week,
                },
            ),
            _ => return None,
        };
        self.latch = Some(latch);
        Some(next)
    }
}

impl Default for ZoomLatch {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
