//! Interaction feedback: haptic pulses and audit records.
//!
//! The sink is a passive observer. Nothing it does can fail the gesture or
//! drag that triggered it: backend errors and panics are logged and dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::models::appointment::AppointmentId;

pub mod audit;
pub mod haptics;

pub use audit::{AuditRecord, AuditSink, LogAuditSink, MemoryAuditSink};
pub use haptics::{HapticCategory, HapticSink, LogHaptics, NoopHaptics};

/// Gesture and drag lifecycle events worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    Select,
    DoubleTap,
    LongPress,
    Swipe,
    ViewChange,
    DragStart,
    DragCancel,
    DragEndSuccess,
    DragEndFailure,
    CommitSuperseded,
}

impl FeedbackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FeedbackEvent::Select => "select",
            FeedbackEvent::DoubleTap => "double_tap",
            FeedbackEvent::LongPress => "long_press",
            FeedbackEvent::Swipe => "swipe",
            FeedbackEvent::ViewChange => "view_change",
            FeedbackEvent::DragStart => "drag_start",
            FeedbackEvent::DragCancel => "drag_cancel",
            FeedbackEvent::DragEndSuccess => "drag_end_success",
            FeedbackEvent::DragEndFailure => "drag_end_failure",
            FeedbackEvent::CommitSuperseded => "commit_superseded",
        }
    }

    /// Haptic pulse for the event; cancellations and stale commits are silent.
    pub fn haptic(&self) -> Option<HapticCategory> {
        match self {
            FeedbackEvent::Select | FeedbackEvent::DoubleTap | FeedbackEvent::ViewChange => {
                Some(HapticCategory::Select)
            }
            FeedbackEvent::LongPress => Some(HapticCategory::LongPress),
            FeedbackEvent::Swipe => Some(HapticCategory::Swipe),
            FeedbackEvent::DragStart => Some(HapticCategory::DragStart),
            FeedbackEvent::DragEndSuccess => Some(HapticCategory::DragEndSuccess),
            FeedbackEvent::DragEndFailure => Some(HapticCategory::DragEndFailure),
            FeedbackEvent::DragCancel | FeedbackEvent::CommitSuperseded => None,
        }
    }
}

/// Optional context attached to a feedback event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackMetadata {
    pub appointment_id: Option<AppointmentId>,
    pub extra: serde_json::Value,
}

impl FeedbackMetadata {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_appointment(id: &AppointmentId) -> Self {
        Self {
            appointment_id: Some(id.clone()),
            extra: serde_json::Value::Null,
        }
    }

    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = extra;
        self
    }
}

/// Dispatches feedback events to the injected backends.
#[derive(Clone)]
pub struct FeedbackSink {
    haptics: Arc<dyn HapticSink>,
    audit: Arc<dyn AuditSink>,
}

impl FeedbackSink {
    pub fn new(haptics: Arc<dyn HapticSink>, audit: Arc<dyn AuditSink>) -> Self {
        Self { haptics, audit }
    }

    /// No haptics, audit through the log.
    pub fn logging() -> Self {
        Self::new(Arc::new(NoopHaptics), Arc::new(LogAuditSink))
    }

    /// Report one event. Never fails.
    pub fn emit(&self, event: FeedbackEvent, metadata: FeedbackMetadata) {
        if let Some(category) = event.haptic() {
            let haptics = &self.haptics;
            swallow("haptic", event, || haptics.pulse(category));
        }

        let record = AuditRecord {
            event: event.name().to_string(),
            appointment_id: metadata.appointment_id,
            timestamp: Utc::now(),
            extra: metadata.extra,
        };
        let audit = &self.audit;
        swallow("audit", event, || audit.record(&record));
    }

    /// Convenience for events that only carry an appointment id.
    pub fn emit_for(&self, event: FeedbackEvent, id: &AppointmentId) {
        self.emit(event, FeedbackMetadata::for_appointment(id));
    }

    pub fn emit_with(&self, event: FeedbackEvent, extra: serde_json::Value) {
        self.emit(event, FeedbackMetadata::none().with_extra(extra));
    }
}

impl Default for FeedbackSink {
    fn default() -> Self {
        Self::logging()
    }
}

impl std::fmt::Debug for FeedbackSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackSink").finish_non_exhaustive()
    }
}

fn swallow<F>(backend: &str, event: FeedbackEvent, call: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            log::warn!("{} backend failed for {}: {:#}", backend, event.name(), err);
        }
        Err(_) => {
            log::warn!("{} backend panicked for {}", backend, event.name());
        }
    }
}

/// Extra payload describing a move, shared by the drag paths.
pub fn move_extra(from: &str, to: &str) -> serde_json::Value {
    json!({ "from": from, "to": to })
}
