// Calendar day cells
// Derived values produced by the grid builder

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::appointment::Appointment;

/// One day cell of the grid.
///
/// Rebuilt from scratch on every grid recomputation; never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub is_current_period: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_weekend: bool,
    /// Appointments starting on this date, ordered by start time
    pub appointments: Vec<Appointment>,
    /// Working-hour slots (day/week views only)
    pub slots: Vec<TimeSlot>,
}

/// A labelled row of the day/week time grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// `"HH:MM"`
    pub time: String,
    pub available: bool,
}

impl CalendarDay {
    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    pub fn free_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.available).count()
    }
}
