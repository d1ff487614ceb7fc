//! Core view-state newtypes

use thiserror::Error;

/// Height of a rendered message in rows. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowHeight(u16);

/// Error returned when attempting to create a zero RowHeight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("RowHeight must be >= 1 (got {0})")]
pub struct InvalidRowHeight(pub u16);

impl RowHeight {
    /// Minimum height of a rendered message.
    pub const ONE: Self = Self(1);

    /// Smart constructor that validates the height is >= 1.
    pub fn new(rows: u16) -> Result<Self, InvalidRowHeight> {
        if rows == 0 {
            Err(InvalidRowHeight(rows))
        } else {
            Ok(Self(rows))
        }
    }

    /// Get the raw row count.
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for RowHeight {
    fn default() -> Self {
        Self::ONE
    }
}

/// Index of a message within the full history. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MessageIndex(usize);

impl MessageIndex {
    /// Create a new MessageIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for MessageIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
