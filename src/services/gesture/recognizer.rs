//! Pointer sequence state machine.
//!
//! Single-touch sequences move `Idle -> Pressed -> (Dragging | Idle)`; a
//! second concurrent touch preempts whatever the first touch was doing and
//! switches to `Pinching`. After a pinch the remaining touch is ignored until
//! it lifts.

use crate::models::appointment::AppointmentId;
use crate::models::geometry::Point;
use crate::models::settings::GestureConfig;
use crate::models::slot_key::SlotKey;
use crate::services::drag_drop::hit_test::HitTester;

use super::intent::{GestureIntent, PointerEvent, PointerPhase, TapTarget};
use super::pinch::PinchTracker;

#[derive(Debug, Clone, PartialEq)]
struct Press {
    pointer_id: u64,
    origin: Point,
    last: Point,
    down_at: u64,
    draggable: Option<AppointmentId>,
    moved: bool,
    long_press_fired: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Drag {
    pointer_id: u64,
    appointment_id: AppointmentId,
    last: Point,
    target: Option<SlotKey>,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Sequence {
    #[default]
    Idle,
    Pressed(Press),
    Dragging(Drag),
    Pinching(PinchTracker),
    /// Waiting for leftover touches to lift after a pinch
    Draining(Vec<u64>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastTap {
    position: Point,
    at: u64,
}

/// Turns raw pointer events into [`GestureIntent`]s.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    sequence: Sequence,
    last_tap: Option<LastTap>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            sequence: Sequence::Idle,
            last_tap: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.sequence, Sequence::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.sequence, Sequence::Dragging(_))
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.sequence, Sequence::Pinching(_))
    }

    /// Feed one pointer event; returns the intents it completes, in order.
    pub fn handle(&mut self, event: PointerEvent, hits: &dyn HitTester) -> Vec<GestureIntent> {
        match event.phase {
            PointerPhase::Down => self.on_down(event, hits),
            PointerPhase::Move => self.on_move(event, hits),
            PointerPhase::Up => self.on_up(event, hits),
            PointerPhase::Cancel => self.on_cancel(event),
        }
    }

    /// Fire a long press for a touch held still past the threshold.
    ///
    /// Hosts call this from their frame or timer loop; the recognizer never
    /// schedules itself.
    pub fn poll(&mut self, now_ms: u64, hits: &dyn HitTester) -> Option<GestureIntent> {
        let long_press_ms = self.config.long_press_ms;
        let Sequence::Pressed(press) = &mut self.sequence else {
            return None;
        };
        if press.moved || press.long_press_fired {
            return None;
        }
        if now_ms.saturating_sub(press.down_at) < long_press_ms {
            return None;
        }

        press.long_press_fired = true;
        let position = press.last;
        self.last_tap = None;
        log::debug!("Long press at ({}, {})", position.x, position.y);
        Some(GestureIntent::LongPress {
            position,
            target: tap_target(position, hits),
        })
    }

    fn on_down(&mut self, event: PointerEvent, hits: &dyn HitTester) -> Vec<GestureIntent> {
        let id = event.pointer_id;
        match std::mem::take(&mut self.sequence) {
            Sequence::Idle => {
                self.sequence = Sequence::Pressed(Press {
                    pointer_id: id,
                    origin: event.position,
                    last: event.position,
                    down_at: event.timestamp_ms,
                    draggable: hits.draggable_at(event.position),
                    moved: false,
                    long_press_fired: false,
                });
                Vec::new()
            }
            Sequence::Pressed(press) if press.pointer_id != id => {
                self.start_pinch((press.pointer_id, press.last), (id, event.position), Vec::new())
            }
            Sequence::Dragging(drag) if drag.pointer_id != id => {
                log::debug!("Second touch cancels drag of {}", drag.appointment_id);
                let cancel = vec![GestureIntent::DragCancel {
                    appointment_id: drag.appointment_id,
                }];
                self.start_pinch((drag.pointer_id, drag.last), (id, event.position), cancel)
            }
            Sequence::Pressed(_) | Sequence::Dragging(_) => {
                // Duplicate down for a pointer we already track: restart it.
                self.sequence = Sequence::Idle;
                self.on_down(event, hits)
            }
            Sequence::Pinching(pinch) => {
                self.sequence = Sequence::Pinching(pinch);
                Vec::new()
            }
            Sequence::Draining(mut ids) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                self.sequence = Sequence::Draining(ids);
                Vec::new()
            }
        }
    }

    fn start_pinch(
        &mut self,
        first: (u64, Point),
        second: (u64, Point),
        mut intents: Vec<GestureIntent>,
    ) -> Vec<GestureIntent> {
        let pinch = PinchTracker::new(first, second);
        intents.push(GestureIntent::PinchStart {
            center: pinch.center(),
        });
        self.last_tap = None;
        self.sequence = Sequence::Pinching(pinch);
        intents
    }

    fn on_move(&mut self, event: PointerEvent, hits: &dyn HitTester) -> Vec<GestureIntent> {
        let id = event.pointer_id;
        let jitter = self.config.jitter_px;
        match &mut self.sequence {
            Sequence::Pressed(press) if press.pointer_id == id => {
                press.last = event.position;
                if press.long_press_fired || press.moved {
                    return Vec::new();
                }
                if press.origin.distance(event.position) <= jitter {
                    return Vec::new();
                }
                press.moved = true;

                let Some(appointment_id) = press.draggable.clone() else {
                    // Background pan: a swipe candidate, decided on release.
                    return Vec::new();
                };
                let target = hits.resolve_target(event.position);
                self.last_tap = None;
                self.sequence = Sequence::Dragging(Drag {
                    pointer_id: id,
                    appointment_id: appointment_id.clone(),
                    last: event.position,
                    target,
                });
                vec![
                    GestureIntent::DragStart {
                        appointment_id: appointment_id.clone(),
                        position: event.position,
                    },
                    GestureIntent::DragMove {
                        appointment_id,
                        position: event.position,
                        target,
                    },
                ]
            }
            Sequence::Dragging(drag) if drag.pointer_id == id => {
                drag.last = event.position;
                drag.target = hits.resolve_target(event.position);
                vec![GestureIntent::DragMove {
                    appointment_id: drag.appointment_id.clone(),
                    position: event.position,
                    target: drag.target,
                }]
            }
            Sequence::Pinching(pinch) => {
                if pinch.update(id, event.position) {
                    vec![GestureIntent::PinchMove {
                        scale: pinch.scale(),
                        center: pinch.center(),
                    }]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn on_up(&mut self, event: PointerEvent, hits: &dyn HitTester) -> Vec<GestureIntent> {
        let id = event.pointer_id;
        match std::mem::take(&mut self.sequence) {
            Sequence::Pressed(mut press) if press.pointer_id == id => {
                press.last = event.position;
                self.finish_press(press, event.timestamp_ms, hits)
                    .into_iter()
                    .collect()
            }
            Sequence::Dragging(drag) if drag.pointer_id == id => {
                let target = hits.resolve_target(event.position);
                match target {
                    Some(target) => vec![GestureIntent::DragDrop {
                        appointment_id: drag.appointment_id,
                        target,
                    }],
                    None => vec![GestureIntent::DragCancel {
                        appointment_id: drag.appointment_id,
                    }],
                }
            }
            Sequence::Pinching(pinch) if pinch.involves(id) => {
                self.sequence = match pinch.other(id) {
                    Some(remaining) => Sequence::Draining(vec![remaining]),
                    None => Sequence::Idle,
                };
                vec![GestureIntent::PinchEnd]
            }
            Sequence::Draining(ids) => {
                self.sequence = drain(ids, id);
                Vec::new()
            }
            other => {
                self.sequence = other;
                Vec::new()
            }
        }
    }

    fn on_cancel(&mut self, event: PointerEvent) -> Vec<GestureIntent> {
        let id = event.pointer_id;
        match std::mem::take(&mut self.sequence) {
            Sequence::Pressed(press) if press.pointer_id == id => Vec::new(),
            Sequence::Dragging(drag) if drag.pointer_id == id => {
                vec![GestureIntent::DragCancel {
                    appointment_id: drag.appointment_id,
                }]
            }
            Sequence::Pinching(pinch) if pinch.involves(id) => {
                self.sequence = match pinch.other(id) {
                    Some(remaining) => Sequence::Draining(vec![remaining]),
                    None => Sequence::Idle,
                };
                vec![GestureIntent::PinchEnd]
            }
            Sequence::Draining(ids) => {
                self.sequence = drain(ids, id);
                Vec::new()
            }
            other => {
                self.sequence = other;
                Vec::new()
            }
        }
    }

    fn finish_press(&mut self, press: Press, up_at: u64, hits: &dyn HitTester) -> Option<GestureIntent> {
        if press.long_press_fired {
            return None;
        }
        if press.moved {
            return self.classify_swipe(&press, up_at);
        }

        let held = up_at.saturating_sub(press.down_at);
        let position = press.last;
        if held >= self.config.long_press_ms {
            self.last_tap = None;
            return Some(GestureIntent::LongPress {
                position,
                target: tap_target(position, hits),
            });
        }

        let target = tap_target(position, hits);
        let is_double = self.last_tap.is_some_and(|last| {
            up_at.saturating_sub(last.at) <= self.config.double_tap_window_ms
                && last.position.distance(position) <= self.config.double_tap_tolerance_px
        });
        if is_double {
            self.last_tap = None;
            Some(GestureIntent::DoubleTap { position, target })
        } else {
            self.last_tap = Some(LastTap {
                position,
                at: up_at,
            });
            Some(GestureIntent::Tap { position, target })
        }
    }

    fn classify_swipe(&mut self, press: &Press, up_at: u64) -> Option<GestureIntent> {
        let dx = press.last.x - press.origin.x;
        let dy = press.last.y - press.origin.y;
        let elapsed = up_at.saturating_sub(press.down_at).max(1) as f32;
        let velocity = dx.abs() / elapsed;

        let is_swipe = dx.abs() >= self.config.swipe_min_distance_px
            && velocity >= self.config.swipe_min_velocity
            && dy.abs() <= self.config.swipe_max_vertical_px;
        self.last_tap = None;
        if !is_swipe {
            log::debug!("Pan of dx={} dy={} v={} is not a swipe", dx, dy, velocity);
            return None;
        }

        if dx < 0.0 {
            Some(GestureIntent::SwipeLeft)
        } else {
            Some(GestureIntent::SwipeRight)
        }
    }
}

fn drain(mut ids: Vec<u64>, lifted: u64) -> Sequence {
    ids.retain(|id| *id != lifted);
    if ids.is_empty() {
        Sequence::Idle
    } else {
        Sequence::Draining(ids)
    }
}

fn tap_target(position: Point, hits: &dyn HitTester) -> TapTarget {
    TapTarget {
        appointment: hits.draggable_at(position),
        slot: hits.resolve_target(position),
    }
}
