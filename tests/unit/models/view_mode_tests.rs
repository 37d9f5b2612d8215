// Unit tests for ViewMode
// Parameterized over every view with test-case

use chrono::NaiveDate;
use test_case::test_case;

use schedule_grid::models::view_mode::ViewMode;
use schedule_grid::models::working_hours::WorkingHours;
use schedule_grid::services::controller::{next_period, previous_period};
use schedule_grid::services::grid::{build_time_grid, GridBuilder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_case("day", ViewMode::Day; "day")]
#[test_case("week", ViewMode::Week; "week")]
#[test_case("month", ViewMode::Month; "month")]
#[test_case(" WEEK ", ViewMode::Week; "padded uppercase")]
fn test_parse_view_mode(input: &str, expected: ViewMode) {
    assert_eq!(input.parse::<ViewMode>().unwrap(), expected);
}

#[test_case(ViewMode::Day, 17; "day view has slots")]
#[test_case(ViewMode::Week, 17; "week view has slots")]
#[test_case(ViewMode::Month, 0; "month view has none")]
fn test_time_grid_length(view: ViewMode, expected: usize) {
    assert_eq!(build_time_grid(view, &WorkingHours::default()).len(), expected);
}

#[test_case(ViewMode::Day, date(2025, 1, 8), date(2025, 1, 8); "day")]
#[test_case(ViewMode::Week, date(2025, 1, 6), date(2025, 1, 12); "week")]
#[test_case(ViewMode::Month, date(2024, 12, 30), date(2025, 2, 2); "month")]
fn test_visible_range(view: ViewMode, first: NaiveDate, last: NaiveDate) {
    assert_eq!(GridBuilder::default().visible_range(date(2025, 1, 8), view), (first, last));
}

#[test_case(ViewMode::Day, date(2025, 3, 1), date(2025, 2, 28); "day across month end")]
#[test_case(ViewMode::Week, date(2025, 1, 8), date(2025, 1, 1); "week")]
#[test_case(ViewMode::Month, date(2024, 3, 31), date(2024, 2, 29); "month clamps to leap day")]
fn test_previous_period(view: ViewMode, from: NaiveDate, expected: NaiveDate) {
    assert_eq!(previous_period(from, view), expected);
}

#[test_case(ViewMode::Day, date(2024, 12, 31), date(2025, 1, 1); "day across year end")]
#[test_case(ViewMode::Week, date(2024, 12, 30), date(2025, 1, 6); "week across year end")]
#[test_case(ViewMode::Month, date(2025, 1, 31), date(2025, 2, 28); "month clamps to short month")]
fn test_next_period(view: ViewMode, from: NaiveDate, expected: NaiveDate) {
    assert_eq!(next_period(from, view), expected);
}

#[test_case(ViewMode::Month, Some(ViewMode::Week), None; "month")]
#[test_case(ViewMode::Week, Some(ViewMode::Day), Some(ViewMode::Month); "week")]
#[test_case(ViewMode::Day, None, Some(ViewMode::Week); "day")]
fn test_zoom_neighbours(view: ViewMode, zoom_in: Option<ViewMode>, zoom_out: Option<ViewMode>) {
    assert_eq!(view.zoom_in(), zoom_in);
    assert_eq!(view.zoom_out(), zoom_out);
}

#[test]
fn test_display_round_trips_through_parse() {
    for view in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
        assert_eq!(view.to_string().parse::<ViewMode>().unwrap(), view);
    }
}
