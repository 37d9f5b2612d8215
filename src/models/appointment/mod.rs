// Appointment module
// Booking appointment as seen by the scheduling grid

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier assigned by the booking system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppointmentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Whether the appointment still occupies its time slot.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

/// An appointment owned by the external booking system.
///
/// Times are local wall-clock values. The grid never edits an appointment in
/// place; a drag produces a shifted copy through [`Appointment::moved_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppointmentError {
    #[error("appointment id cannot be empty")]
    EmptyId,
    #[error("appointment {0} is missing a start time")]
    MissingStart(String),
    #[error("appointment {0} is missing an end time")]
    MissingEnd(String),
    #[error("appointment {0} must end after it starts")]
    EndBeforeStart(String),
}

impl Appointment {
    /// Create a confirmed appointment with the required fields.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use schedule_grid::models::appointment::Appointment;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let end = start + chrono::Duration::minutes(45);
    /// let apt = Appointment::new("apt-1", start, end).unwrap();
    /// assert_eq!(apt.duration().num_minutes(), 45);
    /// ```
    pub fn new(
        id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Self, AppointmentError> {
        Self::builder()
            .id(id)
            .start_time(start_time)
            .end_time(end_time)
            .build()
    }

    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::default()
    }

    pub fn validate(&self) -> Result<(), AppointmentError> {
        if self.id.as_str().trim().is_empty() {
            return Err(AppointmentError::EmptyId);
        }
        if self.end_time <= self.start_time {
            return Err(AppointmentError::EndBeforeStart(self.id.to_string()));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// True when the appointment occupies any part of `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && start < self.end_time
    }

    /// Shadow copy moved to a new date and start time, keeping its duration.
    pub fn moved_to(&self, date: NaiveDate, time: NaiveTime) -> Self {
        let start_time = date.and_time(time);
        Self {
            start_time,
            end_time: start_time + self.duration(),
            ..self.clone()
        }
    }
}

/// Builder for appointments with optional display fields
#[derive(Default)]
pub struct AppointmentBuilder {
    id: Option<String>,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    status: AppointmentStatus,
    service_name: String,
    client_name: String,
    price: f64,
}

impl AppointmentBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn start_time(mut self, start: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn end_time(mut self, end: NaiveDateTime) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> Result<Appointment, AppointmentError> {
        let id = self.id.ok_or(AppointmentError::EmptyId)?;
        let start_time = self
            .start_time
            .ok_or_else(|| AppointmentError::MissingStart(id.clone()))?;
        let end_time = self
            .end_time
            .ok_or_else(|| AppointmentError::MissingEnd(id.clone()))?;

        let appointment = Appointment {
            id: AppointmentId::new(id),
            start_time,
            end_time,
            status: self.status,
            service_name: self.service_name,
            client_name: self.client_name,
            price: self.price,
        };
        appointment.validate()?;
        Ok(appointment)
    }
}
