//! Bounded lending duration.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lending duration in days.
///
/// The exchange accepts funding offers for 2 to 120 days. A `Period`
/// is always within that range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Period(u16);

impl Period {
    /// Shortest lending duration the exchange accepts.
    pub const MIN_DAYS: u16 = 2;
    /// Longest lending duration the exchange accepts.
    pub const MAX_DAYS: u16 = 120;

    /// Shortest valid period.
    pub const MIN: Self = Self(Self::MIN_DAYS);

    /// Create a validated period.
    pub fn new(days: u16) -> Result<Self> {
        if !(Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            return Err(CoreError::InvalidPeriod(days));
        }
        Ok(Self(days))
    }

    /// Clamp an arbitrary day count into the valid range.
    pub fn saturating(days: u16) -> Self {
        Self(days.clamp(Self::MIN_DAYS, Self::MAX_DAYS))
    }

    #[inline]
    pub fn days(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

impl TryFrom<u16> for Period {
    type Error = CoreError;

    fn try_from(days: u16) -> Result<Self> {
        Self::new(days)
    }
}
