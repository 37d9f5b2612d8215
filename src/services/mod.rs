// Service module exports

pub mod controller;
pub mod drag_drop;
pub mod feedback;
pub mod gesture;
pub mod grid;
pub mod settings;
