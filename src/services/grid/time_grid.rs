//! Time grid generation for day and week views.
//!
//! Labels run from the working-hours start to the working-hours end,
//! inclusive of the end tick when it falls on a step boundary.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::appointment::Appointment;
use crate::models::calendar_day::TimeSlot;
use crate::models::view_mode::ViewMode;
use crate::models::working_hours::{format_hhmm, WorkingHours};

/// Default step between slot labels.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Slot start times for the given working hours.
///
/// Invalid hours (unparsable, or end not after start) and a zero step yield
/// an empty list rather than an error.
pub fn slot_times(working_hours: &WorkingHours, step_minutes: u32) -> Vec<NaiveTime> {
    if step_minutes == 0 {
        log::debug!("Slot step of zero minutes, time grid is empty");
        return Vec::new();
    }
    let (start, end) = match working_hours.bounds() {
        Ok(bounds) => bounds,
        Err(err) => {
            log::debug!("Time grid degraded to empty: {}", err);
            return Vec::new();
        }
    };

    let step = Duration::minutes(step_minutes as i64);
    let mut times = Vec::new();
    let mut current = start;
    while current <= end {
        times.push(current);
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }
    times
}

/// `"HH:MM"` labels for the time grid; empty for month view.
pub fn time_labels(view: ViewMode, working_hours: &WorkingHours, step_minutes: u32) -> Vec<String> {
    if !view.has_time_grid() {
        return Vec::new();
    }
    slot_times(working_hours, step_minutes)
        .into_iter()
        .map(format_hhmm)
        .collect()
}

/// Time grid with the default 30 minute step.
pub fn build_time_grid(view: ViewMode, working_hours: &WorkingHours) -> Vec<String> {
    time_labels(view, working_hours, DEFAULT_STEP_MINUTES)
}

/// Slots for one day with availability.
///
/// A slot is unavailable when it starts before `now` or when a non-cancelled
/// appointment overlaps `[slot, slot + step)`.
pub fn day_slots(
    date: NaiveDate,
    appointments: &[Appointment],
    working_hours: &WorkingHours,
    step_minutes: u32,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    let step = Duration::minutes(step_minutes as i64);
    slot_times(working_hours, step_minutes)
        .into_iter()
        .map(|time| {
            let slot_start = date.and_time(time);
            let slot_end = slot_start + step;
            let booked = appointments
                .iter()
                .any(|apt| apt.status.blocks_slot() && apt.overlaps(slot_start, slot_end));
            TimeSlot {
                time: format_hhmm(time),
                available: slot_start >= now && !booked,
            }
        })
        .collect()
}
