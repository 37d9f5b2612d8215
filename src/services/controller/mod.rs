//! Host-facing scheduling grid controller.
//!
//! Owns the grid inputs `(current date, view, appointments, working hours)`
//! and the derived grid, feeds pointer input through the gesture recognizer
//! and dispatches every resulting intent through [`GridController::handle_intent`].
//! The grid is rebuilt whole after any input change.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::models::appointment::{Appointment, AppointmentId};
use crate::models::calendar_day::CalendarDay;
use crate::models::settings::GridSettings;
use crate::models::view_mode::ViewMode;
use crate::models::working_hours::WorkingHours;
use crate::services::drag_drop::{
    AnimatingSet, DragDropCoordinator, DragState, HitTester, MoveCommitService, PendingCommit,
    SlotRegistry,
};
use crate::services::feedback::{FeedbackEvent, FeedbackMetadata, FeedbackSink};
use crate::services::gesture::{GestureIntent, GestureRecognizer, PointerEvent, TapTarget};
use crate::services::grid::{GridBuilder, GridLayout};

pub mod navigation;

pub use navigation::{next_period, previous_period};

/// What a batch of input did, for the host to act on.
#[derive(Debug, Default)]
pub struct InteractionResult {
    /// Intents in the order they were handled
    pub intents: Vec<GestureIntent>,
    /// Set when the view mode changed
    pub view_changed: Option<ViewMode>,
    /// Set when the current date changed
    pub navigated_to: Option<NaiveDate>,
    /// Optimistic copies of appointments moved by a drop
    pub moved_appointments: Vec<Appointment>,
    /// Commits issued by drops; drop them to fire and forget
    pub commits: Vec<PendingCommit>,
}

impl InteractionResult {
    /// Merge another result into this one, keeping arrival order.
    pub fn merge(&mut self, other: InteractionResult) {
        self.intents.extend(other.intents);
        if other.view_changed.is_some() {
            self.view_changed = other.view_changed;
        }
        if other.navigated_to.is_some() {
            self.navigated_to = other.navigated_to;
        }
        self.moved_appointments.extend(other.moved_appointments);
        self.commits.extend(other.commits);
    }

    /// Whether the host needs to repaint or persist anything.
    pub fn has_actions(&self) -> bool {
        self.view_changed.is_some()
            || self.navigated_to.is_some()
            || !self.moved_appointments.is_empty()
            || !self.commits.is_empty()
    }
}

pub struct GridController<H: HitTester> {
    builder: GridBuilder,
    current_date: NaiveDate,
    view: ViewMode,
    appointments: Vec<Appointment>,
    working_hours: WorkingHours,
    now: NaiveDateTime,
    grid: Vec<CalendarDay>,
    time_grid: Vec<String>,
    recognizer: GestureRecognizer,
    coordinator: DragDropCoordinator,
    feedback: FeedbackSink,
    hits: H,
}

impl<H: HitTester> GridController<H> {
    /// Create a controller showing today in the configured default view.
    pub fn new(
        settings: &GridSettings,
        appointments: Vec<Appointment>,
        hits: H,
        commits: Arc<dyn MoveCommitService>,
        feedback: FeedbackSink,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let now = Local::now().naive_local();
        let coordinator =
            DragDropCoordinator::new(commits, feedback.clone(), settings.zoom.clone(), runtime);
        let mut controller = Self {
            builder: GridBuilder::from_settings(settings),
            current_date: now.date(),
            view: settings.default_view,
            appointments,
            working_hours: settings.working_hours.clone(),
            now,
            grid: Vec::new(),
            time_grid: Vec::new(),
            recognizer: GestureRecognizer::new(settings.gesture.clone()),
            coordinator,
            feedback,
            hits,
        };
        controller.rebuild();
        controller
    }

    pub fn grid(&self) -> &[CalendarDay] {
        &self.grid
    }

    pub fn time_grid(&self) -> &[String] {
        &self.time_grid
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn working_hours(&self) -> &WorkingHours {
        &self.working_hours
    }

    pub fn drag_state(&self) -> &DragState {
        self.coordinator.drag_state()
    }

    pub fn animating(&self) -> &AnimatingSet {
        self.coordinator.animating()
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn hit_tester(&self) -> &H {
        &self.hits
    }

    /// Renderers re-register cell rectangles here after painting.
    pub fn hit_tester_mut(&mut self) -> &mut H {
        &mut self.hits
    }

    /// Inclusive date range the host should load appointments for.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        self.builder.visible_range(self.current_date, self.view)
    }

    /// Replace the appointment list with the authoritative one from the host.
    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
        self.rebuild();
    }

    pub fn set_working_hours(&mut self, working_hours: WorkingHours) {
        self.working_hours = working_hours;
        self.rebuild();
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = date;
        self.rebuild();
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.rebuild();
    }

    /// Recompute today/past flags against the wall clock.
    pub fn refresh(&mut self) {
        self.refresh_at(Local::now().naive_local());
    }

    /// Recompute today/past flags against an explicit clock sample.
    pub fn refresh_at(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.rebuild();
    }

    pub fn navigate_next(&mut self) {
        self.set_current_date(next_period(self.current_date, self.view));
    }

    pub fn navigate_previous(&mut self) {
        self.set_current_date(previous_period(self.current_date, self.view));
    }

    pub fn jump_to_today(&mut self) {
        self.set_current_date(self.now.date());
    }

    /// Feed one pointer event and handle every intent it completes.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> InteractionResult {
        let intents = self.recognizer.handle(event, &self.hits);
        self.handle_intents(intents)
    }

    /// Give the recognizer a chance to fire a long press.
    pub fn poll(&mut self, now_ms: u64) -> InteractionResult {
        let intents = self.recognizer.poll(now_ms, &self.hits);
        self.handle_intents(intents.into_iter().collect())
    }

    fn handle_intents(&mut self, intents: Vec<GestureIntent>) -> InteractionResult {
        let mut result = InteractionResult::default();
        for intent in intents {
            result.merge(self.handle_intent(intent));
        }
        result
    }

    /// Apply one gesture intent.
    pub fn handle_intent(&mut self, intent: GestureIntent) -> InteractionResult {
        log::debug!("Handling {} in {} view", intent.name(), self.view);
        let mut result = InteractionResult::default();

        match &intent {
            GestureIntent::Tap { target, .. } => {
                self.feedback.emit(FeedbackEvent::Select, tap_metadata(target));
            }
            GestureIntent::DoubleTap { target, .. } => {
                self.feedback.emit(FeedbackEvent::DoubleTap, tap_metadata(target));
            }
            GestureIntent::LongPress { target, .. } => {
                self.feedback.emit(FeedbackEvent::LongPress, tap_metadata(target));
            }
            GestureIntent::SwipeLeft => {
                self.navigate_next();
                self.feedback.emit_with(FeedbackEvent::Swipe, json!({ "direction": "left" }));
                result.navigated_to = Some(self.current_date);
            }
            GestureIntent::SwipeRight => {
                self.navigate_previous();
                self.feedback.emit_with(FeedbackEvent::Swipe, json!({ "direction": "right" }));
                result.navigated_to = Some(self.current_date);
            }
            GestureIntent::PinchStart { .. } => {
                self.coordinator.on_pinch_start();
            }
            GestureIntent::PinchMove { scale, .. } => {
                if let Some(next) = self.coordinator.on_pinch_move(self.view, *scale) {
                    self.set_view(next);
                    result.view_changed = Some(next);
                }
            }
            GestureIntent::PinchEnd => {}
            GestureIntent::DragStart {
                appointment_id,
                position,
            } => match self.find_appointment(appointment_id) {
                Some(appointment) => {
                    self.coordinator.on_drag_start(&appointment, *position);
                }
                None => {
                    log::warn!("Drag started on unknown appointment {}", appointment_id);
                }
            },
            GestureIntent::DragMove { position, target, .. } => {
                self.coordinator.on_drag_hover(*position, *target);
            }
            GestureIntent::DragDrop {
                appointment_id,
                target,
            } => {
                if self.coordinator.dragged_id() != Some(appointment_id) {
                    log::debug!("Drop for {} does not match the active drag", appointment_id);
                } else if let Some(dropped) = self.coordinator.on_drop(*target) {
                    self.apply_optimistic_move(&dropped.moved);
                    result.moved_appointments.push(dropped.moved);
                    result.commits.push(dropped.commit);
                }
            }
            GestureIntent::DragCancel { appointment_id } => {
                if self.coordinator.dragged_id() == Some(appointment_id) {
                    self.coordinator.on_drag_cancel();
                }
            }
        }

        result.intents.push(intent);
        result
    }

    fn find_appointment(&self, id: &AppointmentId) -> Option<Appointment> {
        self.appointments.iter().find(|apt| &apt.id == id).cloned()
    }

    fn apply_optimistic_move(&mut self, moved: &Appointment) {
        if let Some(slot) = self.appointments.iter_mut().find(|apt| apt.id == moved.id) {
            *slot = moved.clone();
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.grid = self.builder.build_grid_at(
            self.current_date,
            self.view,
            &self.appointments,
            &self.working_hours,
            self.now,
        );
        self.time_grid = self.builder.build_time_grid(self.view, &self.working_hours);
    }
}

impl GridController<SlotRegistry> {
    /// Re-register cell geometry for the current grid.
    pub fn relayout(&mut self, layout: &GridLayout) {
        self.hits.clear();
        layout.register(&self.grid, self.view, &mut self.hits);
    }
}

fn tap_metadata(target: &TapTarget) -> FeedbackMetadata {
    FeedbackMetadata {
        appointment_id: target.appointment.clone(),
        extra: match target.slot {
            Some(slot) => json!({ "slot": slot.to_string() }),
            None => serde_json::Value::Null,
        },
    }
}

impl<H: HitTester> std::fmt::Debug for GridController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("current_date", &self.current_date)
            .field("view", &self.view)
            .field("appointments", &self.appointments.len())
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::{Point, Rect};
    use crate::models::slot_key::SlotKey;
    use crate::services::drag_drop::MoveRequest;
    use crate::services::feedback::{MemoryAuditSink, NoopHaptics};
    use async_trait::async_trait;
    use chrono::{Duration, NaiveTime};

    struct AcceptAll;

    #[async_trait]
    impl MoveCommitService for AcceptAll {
        async fn commit(&self, _request: MoveRequest) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn controller() -> (GridController<SlotRegistry>, Arc<MemoryAuditSink>) {
        let audit = Arc::new(MemoryAuditSink::default());
        let feedback = FeedbackSink::new(Arc::new(NoopHaptics), audit.clone());
        let mut controller = GridController::new(
            &GridSettings::default(),
            Vec::new(),
            SlotRegistry::new(),
            Arc::new(AcceptAll),
            feedback,
            tokio::runtime::Handle::current(),
        );
        controller.refresh_at(monday().and_hms_opt(8, 0, 0).unwrap());
        controller.set_current_date(monday());
        (controller, audit)
    }

    #[tokio::test]
    async fn test_swipes_navigate_in_order() {
        let (mut controller, audit) = controller();

        controller.handle_intent(GestureIntent::SwipeLeft);
        let result = controller.handle_intent(GestureIntent::SwipeLeft);
        assert_eq!(controller.current_date(), monday() + Duration::days(14));
        assert_eq!(result.navigated_to, Some(monday() + Duration::days(14)));

        controller.handle_intent(GestureIntent::SwipeRight);
        assert_eq!(controller.current_date(), monday() + Duration::days(7));
        assert_eq!(controller.grid()[0].date, monday() + Duration::days(7));
        assert_eq!(audit.events(), vec!["swipe", "swipe", "swipe"]);
    }

    #[tokio::test]
    async fn test_pinch_rebuilds_grid_in_new_view() {
        let (mut controller, _) = controller();
        controller.set_view(ViewMode::Month);
        assert_eq!(controller.grid().len() % 7, 0);
        assert!(controller.time_grid().is_empty());

        controller.handle_intent(GestureIntent::PinchStart {
            center: Point::new(0.0, 0.0),
        });
        let mut changes = Vec::new();
        for scale in [1.0, 1.3, 1.35] {
            let result = controller.handle_intent(GestureIntent::PinchMove {
                scale,
                center: Point::new(0.0, 0.0),
            });
            changes.extend(result.view_changed);
        }

        assert_eq!(changes, vec![ViewMode::Week]);
        assert_eq!(controller.view(), ViewMode::Week);
        assert_eq!(controller.grid().len(), 7);
        assert_eq!(controller.time_grid().len(), 17);
    }

    #[tokio::test]
    async fn test_drag_of_unknown_appointment_is_ignored() {
        let (mut controller, audit) = controller();
        controller.handle_intent(GestureIntent::DragStart {
            appointment_id: AppointmentId::new("ghost"),
            position: Point::new(0.0, 0.0),
        });
        assert!(controller.drag_state().is_idle());
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn test_drop_applies_optimistic_move() {
        let (mut controller, _) = controller();
        let start = monday().and_hms_opt(10, 0, 0).unwrap();
        controller.set_appointments(vec![
            Appointment::new("apt-1", start, start + Duration::hours(1)).unwrap(),
        ]);

        let id = AppointmentId::new("apt-1");
        controller.handle_intent(GestureIntent::DragStart {
            appointment_id: id.clone(),
            position: Point::new(0.0, 0.0),
        });
        assert!(controller.animating().contains(&id));

        let target = SlotKey::slot(
            monday() + Duration::days(1),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        );
        let mut result = controller.handle_intent(GestureIntent::DragDrop {
            appointment_id: id.clone(),
            target,
        });

        assert!(controller.drag_state().is_idle());
        assert!(controller.animating().is_empty());
        assert_eq!(result.commits.len(), 1);
        assert!(controller.grid()[0].appointments.is_empty());
        assert_eq!(controller.grid()[1].appointments[0].id, id);

        let commit = result.commits.remove(0);
        assert_eq!(commit.outcome().await, crate::services::drag_drop::CommitOutcome::Committed);
    }

    #[tokio::test]
    async fn test_drag_move_keeps_resolved_target() {
        let (mut controller, _) = controller();
        let start = monday().and_hms_opt(10, 0, 0).unwrap();
        controller.set_appointments(vec![
            Appointment::new("apt-1", start, start + Duration::hours(1)).unwrap(),
        ]);
        let id = AppointmentId::new("apt-1");
        let target = SlotKey::slot(monday(), NaiveTime::from_hms_opt(15, 0, 0).unwrap());

        controller.handle_intent(GestureIntent::DragStart {
            appointment_id: id.clone(),
            position: Point::new(0.0, 0.0),
        });
        // Nothing is registered, so only the intent knows the slot.
        controller.handle_intent(GestureIntent::DragMove {
            appointment_id: id,
            position: Point::new(40.0, 300.0),
            target: Some(target),
        });

        assert_eq!(controller.drag_state().hovered_slot, Some(target));
        assert_eq!(controller.drag_state().current_position, Point::new(40.0, 300.0));
    }

    #[tokio::test]
    async fn test_tap_reports_target() {
        let (mut controller, audit) = controller();
        let slot = SlotKey::slot(monday(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        controller
            .hit_tester_mut()
            .register_slot(Rect::from_origin_size(Point::new(0.0, 0.0), 50.0, 50.0), slot);

        controller.handle_pointer(PointerEvent::down(1, 10.0, 10.0, 0));
        let result = controller.handle_pointer(PointerEvent::up(1, 10.0, 10.0, 40));

        assert_eq!(result.intents.len(), 1);
        assert_eq!(audit.events(), vec!["select"]);
        assert_eq!(audit.records()[0].extra["slot"], "2025-01-06T09:00");
    }
}
