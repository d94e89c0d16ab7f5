//! Cache slot entry.

use serde::Serialize;

use crate::common::{Occupant, Operation};

/// One cache slot: occupant plus recency and status bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// What the slot holds.
    pub occupant: Occupant,
    /// Trace index of the most recent access, `None` if never used.
    pub last_used: Option<usize>,
    /// Trace index at which the occupant was installed.
    pub cached_since: Option<usize>,
    /// Set by every access to the slot.
    pub accessed: bool,
    /// Set by every write access; never cleared within an episode.
    pub dirty: bool,
}

impl Slot {
    /// Marks the slot as accessed at `at_index`.
    #[inline]
    pub fn touch(&mut self, at_index: usize, operation: Operation) {
        self.accessed = true;
        if operation.is_write() {
            self.dirty = true;
        }
        self.last_used = Some(at_index);
    }
}
