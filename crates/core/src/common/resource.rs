//! Resource and occupant types.
//!
//! Defines the identifiers that flow through the simulator:
//! 1. **Resource Ids:** A strong type for the block/sector address touched by a request.
//! 2. **Occupants:** What a cache slot currently holds, with an explicit empty variant
//!    that can never collide with a real resource id.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::UNSET;

/// Identifier of a cacheable resource (the `blocksector` column of a trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Creates a resource id from a raw block/sector address.
    #[inline(always)]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw block/sector address.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<u64> for ResourceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content of a cache slot, or the pending request once the trace is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<ResourceId>", into = "Option<ResourceId>")]
pub enum Occupant {
    /// Nothing cached. Also stands in for the pending request after the episode ends.
    #[default]
    Empty,
    /// A resident resource.
    Resident(ResourceId),
}

impl Occupant {
    /// Returns the resident id, if any.
    #[inline]
    pub const fn resource(self) -> Option<ResourceId> {
        match self {
            Self::Empty => None,
            Self::Resident(id) => Some(id),
        }
    }

    /// Returns `true` when the slot holds nothing.
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Flat integer form used by the Python observation dict (`-1` when empty).
    pub const fn to_raw(self) -> i64 {
        match self {
            Self::Empty => UNSET,
            Self::Resident(id) => id.0 as i64,
        }
    }
}

impl From<ResourceId> for Occupant {
    fn from(id: ResourceId) -> Self {
        Self::Resident(id)
    }
}

impl From<Option<ResourceId>> for Occupant {
    fn from(id: Option<ResourceId>) -> Self {
        id.map_or(Self::Empty, Self::Resident)
    }
}

impl From<Occupant> for Option<ResourceId> {
    fn from(occupant: Occupant) -> Self {
        occupant.resource()
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "-"),
            Self::Resident(id) => write!(f, "{id}"),
        }
    }
}
