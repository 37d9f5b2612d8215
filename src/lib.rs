// Scheduling grid library
// Exports all modules for testing and reuse

pub mod models;
pub mod services;
pub mod utils;

pub use models::appointment::{Appointment, AppointmentId};
pub use models::view_mode::ViewMode;
pub use services::controller::{GridController, InteractionResult};
