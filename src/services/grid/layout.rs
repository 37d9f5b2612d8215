//! Reference cell geometry for hosts without their own renderer.
//!
//! Day and week views lay days out as columns right of a time label gutter,
//! one row per slot. Month view is a 7-column grid of day cells with
//! appointment chips stacked under the date label.

use chrono::NaiveTime;

use crate::models::calendar_day::CalendarDay;
use crate::models::geometry::{Point, Rect};
use crate::models::slot_key::SlotKey;
use crate::models::view_mode::ViewMode;
use crate::models::working_hours::parse_hhmm;
use crate::services::drag_drop::SlotRegistry;

use super::time_grid::DEFAULT_STEP_MINUTES;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_WIDTH: f32 = 100.0;
pub const SLOT_HEIGHT: f32 = 30.0;
pub const MONTH_CELL_HEIGHT: f32 = 100.0;
pub const CHIP_HEIGHT: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub time_label_width: f32,
    pub column_width: f32,
    pub slot_height: f32,
    pub month_cell_height: f32,
    pub chip_height: f32,
    pub step_minutes: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MINUTES)
    }
}

impl GridLayout {
    pub fn new(step_minutes: u32) -> Self {
        Self {
            time_label_width: TIME_LABEL_WIDTH,
            column_width: COLUMN_WIDTH,
            slot_height: SLOT_HEIGHT,
            month_cell_height: MONTH_CELL_HEIGHT,
            chip_height: CHIP_HEIGHT,
            step_minutes: step_minutes.max(1),
        }
    }

    /// Time-grid cell at `column` (day index) and `row` (slot index).
    pub fn slot_rect(&self, column: usize, row: usize) -> Rect {
        Rect::from_origin_size(
            Point::new(
                self.time_label_width + column as f32 * self.column_width,
                row as f32 * self.slot_height,
            ),
            self.column_width,
            self.slot_height,
        )
    }

    /// Month day cell for the `index`th day of the grid.
    pub fn day_cell_rect(&self, index: usize) -> Rect {
        Rect::from_origin_size(
            Point::new(
                (index % 7) as f32 * self.column_width,
                (index / 7) as f32 * self.month_cell_height,
            ),
            self.column_width,
            self.month_cell_height,
        )
    }

    /// Register every drop target and appointment block of `days`.
    pub fn register(&self, days: &[CalendarDay], view: ViewMode, registry: &mut SlotRegistry) {
        if view.has_time_grid() {
            self.register_time_grid(days, registry);
        } else {
            self.register_month(days, registry);
        }
    }

    /// Center of the cell for `key`, when it is on screen.
    pub fn center_of(&self, days: &[CalendarDay], view: ViewMode, key: SlotKey) -> Option<Point> {
        let index = days.iter().position(|day| day.date == key.date)?;
        let rect = if view.has_time_grid() {
            let time = key.time?;
            let row = days[index]
                .slots
                .iter()
                .position(|slot| parse_hhmm(&slot.time).ok() == Some(time))?;
            self.slot_rect(index, row)
        } else {
            self.day_cell_rect(index)
        };
        Some(rect.min.midpoint(rect.max))
    }

    fn register_time_grid(&self, days: &[CalendarDay], registry: &mut SlotRegistry) {
        for (column, day) in days.iter().enumerate() {
            let times: Vec<NaiveTime> = day
                .slots
                .iter()
                .filter_map(|slot| parse_hhmm(&slot.time).ok())
                .collect();
            for (row, time) in times.iter().enumerate() {
                registry.register_slot(self.slot_rect(column, row), SlotKey::slot(day.date, *time));
            }

            let Some(&first) = times.first() else {
                continue;
            };
            let x = self.time_label_width + column as f32 * self.column_width;
            let per_minute = self.slot_height / self.step_minutes as f32;
            for apt in &day.appointments {
                let offset = (apt.start_time.time() - first).num_minutes();
                if offset < 0 {
                    log::debug!("Appointment {} starts before the time grid", apt.id);
                    continue;
                }
                let height = (apt.duration().num_minutes() as f32 * per_minute).max(self.slot_height / 2.0);
                let rect = Rect::from_origin_size(
                    Point::new(x, offset as f32 * per_minute),
                    self.column_width,
                    height,
                );
                registry.register_appointment(rect, apt.id.clone());
            }
        }
    }

    fn register_month(&self, days: &[CalendarDay], registry: &mut SlotRegistry) {
        for (index, day) in days.iter().enumerate() {
            let cell = self.day_cell_rect(index);
            registry.register_slot(cell, SlotKey::day(day.date));

            for (stack, apt) in day.appointments.iter().enumerate() {
                let top = cell.min.y + self.chip_height * (stack + 1) as f32;
                if top + self.chip_height > cell.max.y {
                    break;
                }
                let chip = Rect::from_origin_size(
                    Point::new(cell.min.x, top),
                    self.column_width,
                    self.chip_height,
                );
                registry.register_appointment(chip, apt.id.clone());
            }
        }
    }
}
