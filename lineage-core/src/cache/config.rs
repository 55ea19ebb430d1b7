//! Configuration for [`crate::LineageCache`].

use crate::hierarchy::CycleCheck;

/// Construction parameters for a [`crate::LineageCache`].
///
/// # Examples
/// ```
/// use lineage_core::{CycleCheck, LineageCacheConfig};
///
/// let config = LineageCacheConfig::default()
///     .with_cycle_check(CycleCheck::Transitive)
///     .with_capacity(256);
/// assert_eq!(config.cycle_check(), CycleCheck::Transitive);
/// assert_eq!(config.capacity(), 256);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LineageCacheConfig {
    cycle_check: CycleCheck,
    capacity: usize,
}

impl LineageCacheConfig {
    /// Builds the default configuration: direct cycle checks, no
    /// preallocation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the cycle policy for the backing hierarchy.
    #[must_use]
    pub fn with_cycle_check(mut self, cycle_check: CycleCheck) -> Self {
        self.cycle_check = cycle_check;
        self
    }

    /// Preallocates room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the configured cycle policy.
    #[must_use]
    pub fn cycle_check(&self) -> CycleCheck {
        self.cycle_check
    }

    /// Returns the number of elements preallocated for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
