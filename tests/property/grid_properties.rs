// Property-based tests for grid building
// Checks grid shape and appointment placement with random inputs

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use schedule_grid::models::appointment::Appointment;
use schedule_grid::models::view_mode::ViewMode;
use schedule_grid::models::working_hours::WorkingHours;
use schedule_grid::services::controller::{next_period, previous_period};
use schedule_grid::services::grid::GridBuilder;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000..2100i32, 1..=12u32, 1..=31u32).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
            .unwrap()
    })
}

fn any_view() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Day), Just(ViewMode::Week), Just(ViewMode::Month)]
}

/// Appointments scattered up to six weeks either side of `anchor`.
fn appointments_around(anchor: NaiveDate) -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec((-42i64..42, 0u32..24, 1i64..240), 0..20).prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (offset, hour, minutes))| {
                let start = (anchor + Duration::days(offset)).and_hms_opt(hour, 0, 0).unwrap();
                Appointment::new(format!("apt-{}", i), start, start + Duration::minutes(minutes)).unwrap()
            })
            .collect()
    })
}

fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

proptest! {
    /// Property: grid length is 1 for day, 7 for week, a multiple of 7 for month
    #[test]
    fn prop_grid_length_matches_view(
        date in any_date(),
        view in any_view(),
        first_day in 0..=6u8,
    ) {
        let builder = GridBuilder::new(first_day, 30);
        let days = builder.build_grid_at(date, view, &[], &WorkingHours::default(), noon(date));

        match view {
            ViewMode::Day => prop_assert_eq!(days.len(), 1),
            ViewMode::Week => prop_assert_eq!(days.len(), 7),
            ViewMode::Month => {
                prop_assert_eq!(days.len() % 7, 0);
                prop_assert!(days.len() >= 28 && days.len() <= 42);
            }
        }
        prop_assert!(days.iter().any(|day| day.date == date));
        prop_assert!(days.windows(2).all(|pair| pair[1].date - pair[0].date == Duration::days(1)));
    }

    /// Property: week and month grids start on the configured first day of the week
    #[test]
    fn prop_grid_starts_on_week_start(date in any_date(), first_day in 0..=6u8) {
        let builder = GridBuilder::new(first_day, 30);
        for view in [ViewMode::Week, ViewMode::Month] {
            let days = builder.build_grid_at(date, view, &[], &WorkingHours::default(), noon(date));
            prop_assert_eq!(days[0].date.weekday().num_days_from_sunday(), first_day as u32);
        }
    }

    /// Property: an appointment in the visible range lands in exactly one day, its start date
    #[test]
    fn prop_each_appointment_in_one_day(
        (date, appointments) in any_date().prop_flat_map(|date| (Just(date), appointments_around(date))),
        view in any_view(),
    ) {
        let builder = GridBuilder::default();
        let days = builder.build_grid_at(date, view, &appointments, &WorkingHours::default(), noon(date));
        let (first, last) = builder.visible_range(date, view);

        for apt in &appointments {
            let holders: Vec<NaiveDate> = days
                .iter()
                .filter(|day| day.appointments.iter().any(|a| a.id == apt.id))
                .map(|day| day.date)
                .collect();
            if apt.date() >= first && apt.date() <= last {
                prop_assert_eq!(holders, vec![apt.date()]);
            } else {
                prop_assert!(holders.is_empty());
            }
        }
    }

    /// Property: building twice from the same inputs gives the same grid
    #[test]
    fn prop_grid_is_idempotent(
        (date, appointments) in any_date().prop_flat_map(|date| (Just(date), appointments_around(date))),
        view in any_view(),
    ) {
        let builder = GridBuilder::default();
        let hours = WorkingHours::default();
        let first = builder.build_grid_at(date, view, &appointments, &hours, noon(date));
        let second = builder.build_grid_at(date, view, &appointments, &hours, noon(date));
        prop_assert_eq!(first, second);
    }

    /// Property: day and week navigation are exact inverses
    #[test]
    fn prop_navigation_round_trips(date in any_date()) {
        for view in [ViewMode::Day, ViewMode::Week] {
            prop_assert_eq!(previous_period(next_period(date, view), view), date);
        }
        let next_month = next_period(date, ViewMode::Month);
        prop_assert!(next_month.day() <= date.day());
    }
}
