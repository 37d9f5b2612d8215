use chrono::{Duration, NaiveDate};

use crate::models::view_mode::ViewMode;
use crate::utils::date::shift_month_preserving_day;

/// The date one period after `current` for the view.
pub fn next_period(current: NaiveDate, view: ViewMode) -> NaiveDate {
    match view {
        ViewMode::Day => current + Duration::days(1),
        ViewMode::Week => current + Duration::weeks(1),
        ViewMode::Month => shift_month_preserving_day(current, 1),
    }
}

/// The date one period before `current` for the view.
pub fn previous_period(current: NaiveDate, view: ViewMode) -> NaiveDate {
    match view {
        ViewMode::Day => current - Duration::days(1),
        ViewMode::Week => current - Duration::weeks(1),
        ViewMode::Month => shift_month_preserving_day(current, -1),
    }
}
