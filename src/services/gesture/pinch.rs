//! Two-finger pinch tracking.

use crate::models::geometry::Point;

/// Smallest initial spread accepted, so scale stays finite when both touches
/// land on the same pixel.
const MIN_SPREAD_PX: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PinchTracker {
    pointers: [(u64, Point); 2],
    initial_distance: f32,
}

impl PinchTracker {
    pub fn new(first: (u64, Point), second: (u64, Point)) -> Self {
        let initial_distance = first.1.distance(second.1).max(MIN_SPREAD_PX);
        Self {
            pointers: [first, second],
            initial_distance,
        }
    }

    pub fn involves(&self, pointer_id: u64) -> bool {
        self.pointers.iter().any(|(id, _)| *id == pointer_id)
    }

    /// Update one touch; returns false for pointers outside the pinch.
    pub fn update(&mut self, pointer_id: u64, position: Point) -> bool {
        match self.pointers.iter_mut().find(|(id, _)| *id == pointer_id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    /// Current spread relative to the spread at pinch start.
    pub fn scale(&self) -> f32 {
        self.pointers[0].1.distance(self.pointers[1].1) / self.initial_distance
    }

    pub fn center(&self) -> Point {
        self.pointers[0].1.midpoint(self.pointers[1].1)
    }

    /// The touch that is still down once `lifted` goes up.
    pub fn other(&self, lifted: u64) -> Option<u64> {
        self.pointers
            .iter()
            .map(|(id, _)| *id)
            .find(|id| *id != lifted)
    }
}
