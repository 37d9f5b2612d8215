use std::collections::BTreeSet;

use crate::models::appointment::AppointmentId;

/// Appointments currently rendered with drag animation.
///
/// Entries are added on drag start and removed on drop or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatingSet {
    ids: BTreeSet<AppointmentId>,
}

impl AnimatingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already animating.
    pub fn start(&mut self, id: &AppointmentId) -> bool {
        self.ids.insert(id.clone())
    }

    /// Returns false if the id was not animating.
    pub fn finish(&mut self, id: &AppointmentId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &AppointmentId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppointmentId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
