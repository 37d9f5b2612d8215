//! Raw pointer input and the gesture intents recognized from it.

use serde::{Deserialize, Serialize};

use crate::models::appointment::AppointmentId;
use crate::models::geometry::Point;
use crate::models::slot_key::SlotKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer/touch primitive from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    /// Stable id for the lifetime of one touch or mouse press
    pub pointer_id: u64,
    pub phase: PointerPhase,
    pub position: Point,
    /// Monotonic host clock in milliseconds
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn down(pointer_id: u64, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Down, x, y, timestamp_ms)
    }

    pub fn moved(pointer_id: u64, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Move, x, y, timestamp_ms)
    }

    pub fn up(pointer_id: u64, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Up, x, y, timestamp_ms)
    }

    pub fn cancel(pointer_id: u64, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(pointer_id, PointerPhase::Cancel, x, y, timestamp_ms)
    }

    fn new(pointer_id: u64, phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            pointer_id,
            phase,
            position: Point::new(x, y),
            timestamp_ms,
        }
    }
}

/// What was under the pointer when a tap-like gesture fired.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TapTarget {
    pub appointment: Option<AppointmentId>,
    pub slot: Option<SlotKey>,
}

/// Discrete gestures, consumed once by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureIntent {
    Tap {
        position: Point,
        target: TapTarget,
    },
    DoubleTap {
        position: Point,
        target: TapTarget,
    },
    LongPress {
        position: Point,
        target: TapTarget,
    },
    SwipeLeft,
    SwipeRight,
    PinchStart {
        center: Point,
    },
    PinchMove {
        scale: f32,
        center: Point,
    },
    PinchEnd,
    DragStart {
        appointment_id: AppointmentId,
        position: Point,
    },
    DragMove {
        appointment_id: AppointmentId,
        position: Point,
        target: Option<SlotKey>,
    },
    DragDrop {
        appointment_id: AppointmentId,
        target: SlotKey,
    },
    DragCancel {
        appointment_id: AppointmentId,
    },
}

impl GestureIntent {
    /// Short name used in logs and audit records.
    pub fn name(&self) -> &'static str {
        match self {
            GestureIntent::Tap { .. } => "tap",
            GestureIntent::DoubleTap { .. } => "double_tap",
            GestureIntent::LongPress { .. } => "long_press",
            GestureIntent::SwipeLeft => "swipe_left",
            GestureIntent::SwipeRight => "swipe_right",
            GestureIntent::PinchStart { .. } => "pinch_start",
            GestureIntent::PinchMove { .. } => "pinch_move",
            GestureIntent::PinchEnd => "pinch_end",
            GestureIntent::DragStart { .. } => "drag_start",
            GestureIntent::DragMove { .. } => "drag_move",
            GestureIntent::DragDrop { .. } => "drag_drop",
            GestureIntent::DragCancel { .. } => "drag_cancel",
        }
    }
}
