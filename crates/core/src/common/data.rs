//! Request Operation Types.
//!
//! This module defines the classification of trace requests. Operations are used for:
//! 1. **Dirty Tracking:** A write hit or write install marks the slot dirty.
//! 2. **Trace Decoding:** Mapping the `read/write` column (0/1) to a typed value.

use serde::{Deserialize, Serialize};

/// Type of a recorded request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Block read (`read/write == 0`).
    #[default]
    Read,

    /// Block write (`read/write == 1`). Sets the dirty bit of the slot it lands in.
    Write,
}

impl Operation {
    /// Decodes the integer encoding used by trace logs.
    ///
    /// Returns `None` for anything other than 0 or 1.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Read),
            1 => Some(Self::Write),
            _ => None,
        }
    }

    /// Integer encoding (0 = read, 1 = write).
    pub const fn code(self) -> u8 {
        match self {
            Self::Read => 0,
            Self::Write => 1,
        }
    }

    /// Returns `true` for writes.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
