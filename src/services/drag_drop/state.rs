use serde::Serialize;

use crate::models::appointment::Appointment;
use crate::models::geometry::Point;
use crate::models::slot_key::SlotKey;

/// Visual state of the in-flight drag, owned by the coordinator.
///
/// Renderers receive copies through
/// [`DragDropCoordinator::drag_state`](super::DragDropCoordinator::drag_state).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub is_dragging: bool,
    /// Snapshot of the appointment as it was when the drag started
    pub dragged_item: Option<Appointment>,
    pub current_position: Point,
    pub origin_slot: Option<SlotKey>,
    pub hovered_slot: Option<SlotKey>,
}

impl DragState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn begin(appointment: &Appointment, position: Point) -> Self {
        let origin = SlotKey::slot(appointment.date(), appointment.start_time.time());
        Self {
            is_dragging: true,
            dragged_item: Some(appointment.clone()),
            current_position: position,
            origin_slot: Some(origin),
            hovered_slot: Some(origin),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.is_dragging
    }
}
