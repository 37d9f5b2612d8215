//! Drag-and-drop rescheduling.
//!
//! The coordinator owns the single in-flight [`DragState`]. A drop resets
//! that state immediately (optimistic UI) and hands the move to the external
//! [`MoveCommitService`] on the tokio runtime; the grid is not rolled back if
//! the service rejects the move. The host is expected to refetch the
//! authoritative appointment list, which the grid builder then picks up.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::models::appointment::{Appointment, AppointmentId};
use crate::models::geometry::Point;
use crate::models::settings::ZoomConfig;
use crate::models::slot_key::SlotKey;
use crate::models::view_mode::ViewMode;
use crate::services::feedback::{move_extra, FeedbackEvent, FeedbackMetadata, FeedbackSink};

pub mod animation;
pub mod commit;
pub mod state;
pub mod zoom;

pub use animation::AnimatingSet;
pub use commit::{CommitLedger, CommitOutcome, MoveCommitService, MoveRequest, PendingCommit};
pub use hit_test::{HitTester, SlotRegistry};
pub use state::DragState;
pub use zoom::ZoomLatch;

/// Result of a successful drop.
#[derive(Debug)]
pub struct DropResult {
    /// Optimistic copy of the appointment at its new position
    pub moved: Appointment,
    pub commit: PendingCommit,
}

pub struct DragDropCoordinator {
    state: DragState,
    animating: AnimatingSet,
    zoom: ZoomLatch,
    commits: Arc<dyn MoveCommitService>,
    ledger: Arc<CommitLedger>,
    feedback: FeedbackSink,
    runtime: tokio::runtime::Handle,
}

impl DragDropCoordinator {
    pub fn new(
        commits: Arc<dyn MoveCommitService>,
        feedback: FeedbackSink,
        zoom: ZoomConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            state: DragState::idle(),
            animating: AnimatingSet::new(),
            zoom: ZoomLatch::new(zoom),
            commits,
            ledger: Arc::new(CommitLedger::new()),
            feedback,
            runtime,
        }
    }

    /// Build on the runtime of the calling context.
    pub fn on_current_runtime(
        commits: Arc<dyn MoveCommitService>,
        feedback: FeedbackSink,
        zoom: ZoomConfig,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .context("drag/drop coordinator must be created inside a tokio runtime")?;
        Ok(Self::new(commits, feedback, zoom, runtime))
    }

    pub fn drag_state(&self) -> &DragState {
        &self.state
    }

    pub fn animating(&self) -> &AnimatingSet {
        &self.animating
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn dragged_id(&self) -> Option<&AppointmentId> {
        self.state.dragged_item.as_ref().map(|apt| &apt.id)
    }

    pub fn commits_in_flight(&self) -> usize {
        self.ledger.in_flight()
    }

    /// Begin dragging `appointment`. Returns false, changing nothing, when a
    /// drag is already active.
    pub fn on_drag_start(&mut self, appointment: &Appointment, position: Point) -> bool {
        if self.state.is_dragging {
            log::debug!(
                "Ignoring drag of {} while {:?} is being dragged",
                appointment.id,
                self.dragged_id()
            );
            return false;
        }

        self.state = DragState::begin(appointment, position);
        self.animating.start(&appointment.id);
        log::debug!("Drag started for appointment {}", appointment.id);
        self.feedback.emit_for(FeedbackEvent::DragStart, &appointment.id);
        true
    }

    /// Track the pointer and the slot under it. Visual state only.
    pub fn on_drag_move(&mut self, position: Point, hits: &dyn hit_test::HitTester) -> Option<SlotKey> {
        if !self.state.is_dragging {
            return None;
        }
        self.on_drag_hover(position, hits.resolve_target(position))
    }

    /// Like [`Self::on_drag_move`] when the slot under `position` is already known.
    pub fn on_drag_hover(&mut self, position: Point, target: Option<SlotKey>) -> Option<SlotKey> {
        if !self.state.is_dragging {
            return None;
        }
        self.state.current_position = position;
        self.state.hovered_slot = target;
        self.state.hovered_slot
    }

    /// Finish the drag on `target` and issue the move commit.
    ///
    /// A day cell (no time) keeps the appointment's original time of day.
    /// Returns `None` when no drag is active.
    pub fn on_drop(&mut self, target: SlotKey) -> Option<DropResult> {
        let state = std::mem::take(&mut self.state);
        let original = state.dragged_item?;
        self.animating.finish(&original.id);

        let new_date: NaiveDate = target.date;
        let new_time: NaiveTime = target.time.unwrap_or_else(|| original.start_time.time());
        let moved = original.moved_to(new_date, new_time);

        let origin = state
            .origin_slot
            .map(|slot| slot.to_string())
            .unwrap_or_default();
        let destination = SlotKey::slot(new_date, new_time).to_string();
        log::info!(
            "Dropping appointment {} from {} onto {}",
            original.id,
            origin,
            destination
        );

        let request = MoveRequest {
            appointment_id: original.id.clone(),
            new_date,
            new_time,
            sequence: self.ledger.issue(&original.id),
        };
        let commit = commit::spawn_commit(
            &self.runtime,
            self.commits.clone(),
            self.ledger.clone(),
            self.feedback.clone(),
            request,
        );

        Some(DropResult { moved, commit })
    }

    /// Abandon the drag without committing. Returns false when idle.
    pub fn on_drag_cancel(&mut self) -> bool {
        let state = std::mem::take(&mut self.state);
        let Some(original) = state.dragged_item else {
            return false;
        };
        self.animating.finish(&original.id);
        log::debug!("Drag of {} cancelled", original.id);

        let origin = state
            .origin_slot
            .map(|slot| slot.to_string())
            .unwrap_or_default();
        let hovered = state
            .hovered_slot
            .map(|slot| slot.to_string())
            .unwrap_or_default();
        self.feedback.emit(
            FeedbackEvent::DragCancel,
            FeedbackMetadata::for_appointment(&original.id).with_extra(move_extra(&origin, &hovered)),
        );
        true
    }

    pub fn on_pinch_start(&mut self) {
        self.zoom.reset();
    }

    /// Apply a pinch scale sample; returns the view to switch to, if any.
    pub fn on_pinch_move(&mut self, view: ViewMode, scale: f32) -> Option<ViewMode> {
        let next = self.zoom.update(view, scale)?;
        log::info!("Pinch at scale {:.2} switches {} -> {}", scale, view, next);
        self.feedback.emit_with(
            FeedbackEvent::ViewChange,
            json!({ "from": view.as_str(), "to": next.as_str(), "scale": scale }),
        );
        Some(next)
    }
}

impl std::fmt::Debug for DragDropCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDropCoordinator")
            .field("state", &self.state)
            .field("animating", &self.animating)
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}
