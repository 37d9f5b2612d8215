// Module exports for models

pub mod appointment;
pub mod calendar_day;
pub mod geometry;
pub mod settings;
pub mod slot_key;
pub mod view_mode;
pub mod working_hours;
