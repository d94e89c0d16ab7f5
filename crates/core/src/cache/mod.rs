//! Fully-Associative Cache State.
//!
//! This module holds the slot array driven by the stepper. Unlike a set-associative
//! cache, any resource may land in any slot and the victim is chosen by the agent, so
//! there is no replacement policy here. It tracks:
//! 1. **Occupancy:** Which resource each slot holds, with an O(1) residency index.
//! 2. **Recency:** Install and last-use indices per slot.
//! 3. **Status bits:** Access and dirty flags per slot.
//! 4. **Frequency:** How often each resource has been requested in the episode.

/// Slot entry type.
pub mod slot;

use std::collections::HashMap;
use std::fmt;

pub use self::slot::Slot;
use crate::common::{Occupant, Operation, ResourceId};

/// Slot array with a resource→slot index and per-resource request counts.
#[derive(Debug, Clone, Default)]
pub struct CacheState {
    slots: Vec<Slot>,
    index: HashMap<ResourceId, usize>,
    frequency: HashMap<ResourceId, u64>,
}

impl CacheState {
    /// Creates an empty cache with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            index: HashMap::with_capacity(capacity),
            frequency: HashMap::new(),
        }
    }

    /// Number of slots (C).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empties every slot and forgets all request counts.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::default());
        self.index.clear();
        self.frequency.clear();
    }

    /// Returns the slot currently holding `resource`.
    #[inline]
    pub fn slot_of(&self, resource: ResourceId) -> Option<usize> {
        self.index.get(&resource).copied()
    }

    /// Returns `true` if `resource` is resident.
    #[inline]
    pub fn contains(&self, resource: ResourceId) -> bool {
        self.index.contains_key(&resource)
    }

    /// Number of non-empty slots.
    #[inline]
    pub fn resident_count(&self) -> usize {
        self.index.len()
    }

    /// Places `resource` in `slot`, displacing the previous occupant.
    ///
    /// Only occupancy and the install index change; the access and dirty bits are left
    /// for the [`CacheState::record_hit`] that always follows an install. The caller must
    /// pass an in-range slot and a resource that is not already resident elsewhere.
    ///
    /// Returns the displaced occupant.
    pub fn install(&mut self, slot: usize, resource: ResourceId, at_index: usize) -> Occupant {
        debug_assert!(
            self.slot_of(resource).is_none_or(|s| s == slot),
            "resource {resource} already resident in another slot"
        );
        let entry = &mut self.slots[slot];
        let displaced = entry.occupant;
        if let Some(old) = displaced.resource() {
            let _ = self.index.remove(&old);
        }
        entry.occupant = Occupant::Resident(resource);
        entry.cached_since = Some(at_index);
        let _ = self.index.insert(resource, slot);
        displaced
    }

    /// Records an access to `slot` at trace index `at_index`.
    #[inline]
    pub fn record_hit(&mut self, slot: usize, at_index: usize, operation: Operation) {
        self.slots[slot].touch(at_index, operation);
    }

    /// Counts one more request for `resource`.
    #[inline]
    pub fn touch_frequency(&mut self, resource: ResourceId) {
        *self.frequency.entry(resource).or_insert(0) += 1;
    }

    /// Number of times `resource` was requested while stepping.
    pub fn frequency(&self, resource: ResourceId) -> u64 {
        self.frequency.get(&resource).copied().unwrap_or(0)
    }

    /// All slots, in slot order.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Occupant of every slot, in slot order.
    pub fn occupants(&self) -> impl ExactSizeIterator<Item = Occupant> + '_ {
        self.slots.iter().map(|s| s.occupant)
    }
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, occupant) in self.occupants().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{occupant}")?;
        }
        write!(f, "]")
    }
}
