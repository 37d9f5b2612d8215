//! Calendar grid geometry.
//!
//! Pure functions turning `(current date, view, appointments, working hours)`
//! into day cells and time-slot rows. Nothing here holds state, so the grid
//! can be rebuilt wholesale whenever any input changes.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::models::appointment::Appointment;
use crate::models::calendar_day::CalendarDay;
use crate::models::settings::GridSettings;
use crate::models::view_mode::ViewMode;
use crate::models::working_hours::WorkingHours;
use crate::utils::date::{first_of_month, is_weekend, last_of_month, week_end, week_start};

pub mod layout;
pub mod time_grid;

pub use layout::GridLayout;
pub use time_grid::{build_time_grid, day_slots, slot_times, time_labels, DEFAULT_STEP_MINUTES};

/// Grid options that come from host configuration rather than per-build input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBuilder {
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub step_minutes: u32,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self {
            first_day_of_week: 1,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

impl GridBuilder {
    pub fn new(first_day_of_week: u8, step_minutes: u32) -> Self {
        Self {
            first_day_of_week,
            step_minutes,
        }
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self::new(settings.first_day_of_week, settings.slot_step_minutes)
    }

    /// Inclusive first and last date shown for the view.
    pub fn visible_range(&self, current_date: NaiveDate, view: ViewMode) -> (NaiveDate, NaiveDate) {
        match view {
            ViewMode::Day => (current_date, current_date),
            ViewMode::Week => (
                week_start(current_date, self.first_day_of_week),
                week_end(current_date, self.first_day_of_week),
            ),
            ViewMode::Month => (
                week_start(first_of_month(current_date), self.first_day_of_week),
                week_end(last_of_month(current_date), self.first_day_of_week),
            ),
        }
    }

    /// Build the day cells using the wall clock for today/past flags.
    pub fn build_grid(
        &self,
        current_date: NaiveDate,
        view: ViewMode,
        appointments: &[Appointment],
        working_hours: &WorkingHours,
    ) -> Vec<CalendarDay> {
        self.build_grid_at(
            current_date,
            view,
            appointments,
            working_hours,
            Local::now().naive_local(),
        )
    }

    /// Build the day cells relative to an explicit `now`.
    pub fn build_grid_at(
        &self,
        current_date: NaiveDate,
        view: ViewMode,
        appointments: &[Appointment],
        working_hours: &WorkingHours,
        now: NaiveDateTime,
    ) -> Vec<CalendarDay> {
        let (first, last) = self.visible_range(current_date, view);
        let mut by_date = group_by_start_date(appointments, first, last);
        let today = now.date();

        let mut days = Vec::with_capacity((last - first).num_days() as usize + 1);
        let mut date = first;
        while date <= last {
            let appointments = by_date.remove(&date).unwrap_or_default();
            let slots = if view.has_time_grid() {
                day_slots(date, &appointments, working_hours, self.step_minutes, now)
            } else {
                Vec::new()
            };

            days.push(CalendarDay {
                date,
                is_current_period: is_current_period(date, current_date, view),
                is_today: date == today,
                is_past: date < today,
                is_weekend: is_weekend(date),
                appointments,
                slots,
            });
            date += Duration::days(1);
        }
        days
    }

    pub fn build_time_grid(&self, view: ViewMode, working_hours: &WorkingHours) -> Vec<String> {
        time_labels(view, working_hours, self.step_minutes)
    }
}

/// Build a grid with default options (Monday week start, 30 minute step).
pub fn build_grid(
    current_date: NaiveDate,
    view: ViewMode,
    appointments: &[Appointment],
    working_hours: &WorkingHours,
) -> Vec<CalendarDay> {
    GridBuilder::default().build_grid(current_date, view, appointments, working_hours)
}

fn is_current_period(date: NaiveDate, current_date: NaiveDate, view: ViewMode) -> bool {
    match view {
        ViewMode::Day | ViewMode::Week => true,
        ViewMode::Month => {
            date.year() == current_date.year() && date.month() == current_date.month()
        }
    }
}

fn group_by_start_date(
    appointments: &[Appointment],
    first: NaiveDate,
    last: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<Appointment>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Appointment>> = BTreeMap::new();
    for apt in appointments {
        let date = apt.date();
        if date >= first && date <= last {
            by_date.entry(date).or_default().push(apt.clone());
        }
    }
    for list in by_date.values_mut() {
        list.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
    }
    by_date
}
