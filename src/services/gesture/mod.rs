//! Gesture recognition over raw pointer and touch input.
//!
//! The recognizer is a pure state machine: the host feeds it
//! [`PointerEvent`]s (and calls [`GestureRecognizer::poll`] for long-press
//! timing) and receives [`GestureIntent`]s back. Element lookup goes through
//! an injected [`HitTester`](crate::services::drag_drop::hit_test::HitTester).

pub mod intent;
pub mod pinch;
pub mod recognizer;

pub use intent::{GestureIntent, PointerEvent, PointerPhase, TapTarget};
pub use pinch::PinchTracker;
pub use recognizer::GestureRecognizer;
