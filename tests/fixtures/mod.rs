// Test fixtures - reusable test data
// Provides consistent appointments, collaborators and controllers across test files

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use schedule_grid::models::appointment::{Appointment, AppointmentStatus};
use schedule_grid::models::settings::GridSettings;
use schedule_grid::services::controller::GridController;
use schedule_grid::services::drag_drop::{MoveCommitService, MoveRequest, SlotRegistry};
use schedule_grid::services::feedback::{FeedbackSink, HapticCategory, HapticSink, MemoryAuditSink};
use schedule_grid::services::grid::GridLayout;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 6 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Tuesday, Jan 7 2025
    pub fn tuesday() -> NaiveDate {
        monday() + Duration::days(1)
    }

    /// Early Monday morning, before working hours
    pub fn monday_morning() -> NaiveDateTime {
        monday().and_hms_opt(7, 30, 0).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample appointments for testing
pub mod appointments {
    use super::*;

    /// One hour haircut, Monday 10:00
    pub fn apt_1() -> Appointment {
        let start = dates::at(dates::monday(), 10, 0);
        Appointment::builder()
            .id("apt-1")
            .start_time(start)
            .end_time(start + Duration::hours(1))
            .service_name("Haircut")
            .client_name("Alex")
            .price(35.0)
            .build()
            .unwrap()
    }

    /// Thirty minute beard trim, Monday 13:00
    pub fn apt_2() -> Appointment {
        let start = dates::at(dates::monday(), 13, 0);
        Appointment::builder()
            .id("apt-2")
            .start_time(start)
            .end_time(start + Duration::minutes(30))
            .service_name("Beard trim")
            .build()
            .unwrap()
    }

    /// Cancelled booking, Tuesday 09:00
    pub fn cancelled() -> Appointment {
        let start = dates::at(dates::tuesday(), 9, 0);
        Appointment::builder()
            .id("apt-cancelled")
            .start_time(start)
            .end_time(start + Duration::hours(1))
            .status(AppointmentStatus::Cancelled)
            .build()
            .unwrap()
    }

    pub fn week() -> Vec<Appointment> {
        vec![apt_1(), apt_2(), cancelled()]
    }
}

/// Commit service that records every request.
#[derive(Default)]
pub struct RecordingCommits {
    pub requests: Mutex<Vec<MoveRequest>>,
    pub reject: bool,
}

impl RecordingCommits {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<MoveRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoveCommitService for RecordingCommits {
    async fn commit(&self, request: MoveRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request);
        if self.reject {
            anyhow::bail!("slot no longer available");
        }
        Ok(())
    }
}

/// Haptic backend that records pulses.
#[derive(Default)]
pub struct RecordingHaptics {
    pub pulses: Mutex<Vec<HapticCategory>>,
}

impl RecordingHaptics {
    pub fn pulses(&self) -> Vec<HapticCategory> {
        self.pulses.lock().unwrap().clone()
    }
}

impl HapticSink for RecordingHaptics {
    fn pulse(&self, category: HapticCategory) -> Result<()> {
        self.pulses.lock().unwrap().push(category);
        Ok(())
    }
}

/// Haptic backend that always fails.
pub struct BrokenHaptics;

impl HapticSink for BrokenHaptics {
    fn pulse(&self, _category: HapticCategory) -> Result<()> {
        anyhow::bail!("vibration motor unavailable")
    }
}

/// Controller plus the doubles wired into it.
pub struct Harness {
    pub controller: GridController<SlotRegistry>,
    pub commits: Arc<RecordingCommits>,
    pub haptics: Arc<RecordingHaptics>,
    pub audit: Arc<MemoryAuditSink>,
    pub layout: GridLayout,
}

impl Harness {
    /// Week of Jan 6 2025 with the sample appointments, laid out for hit testing.
    pub fn week() -> Self {
        Self::with_commits(RecordingCommits::default())
    }

    pub fn with_commits(commits: RecordingCommits) -> Self {
        let commits = Arc::new(commits);
        let haptics = Arc::new(RecordingHaptics::default());
        let audit = Arc::new(MemoryAuditSink::default());
        let feedback = FeedbackSink::new(haptics.clone(), audit.clone());

        let mut controller = GridController::new(
            &GridSettings::default(),
            appointments::week(),
            SlotRegistry::new(),
            commits.clone(),
            feedback,
            tokio::runtime::Handle::current(),
        );
        controller.refresh_at(dates::monday_morning());
        controller.set_current_date(dates::monday());

        let layout = GridLayout::default();
        controller.relayout(&layout);

        Self {
            controller,
            commits,
            haptics,
            audit,
            layout,
        }
    }

    pub fn relayout(&mut self) {
        let layout = self.layout;
        self.controller.relayout(&layout);
    }
}
