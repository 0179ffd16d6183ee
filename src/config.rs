// src/config.rs
//! Capacity growth and shrink configuration for [`Buffer`](crate::Buffer).

/// Growth and shrink policy applied by a [`Buffer`](crate::Buffer).
///
/// The default policy doubles on overflow and, after a removal, shrinks to
/// `max(1, len * 2)` once no more than a quarter of the slots are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    /// Multiplier applied to a full, non-empty buffer's capacity
    pub growth_factor: usize,
    /// Shrink when `len <= capacity / shrink_divisor`; `0` disables shrinking
    pub shrink_divisor: usize,
    /// Capacity after a shrink is `len * shrink_headroom`
    pub shrink_headroom: usize,
    /// Smallest capacity ever allocated
    pub min_capacity: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            growth_factor: 2,
            shrink_divisor: 4,
            shrink_headroom: 2,
            min_capacity: 1,
        }
    }
}

impl CapacityPolicy {
    /// Grow like the default policy but never give memory back.
    pub fn never_shrink() -> Self {
        Self {
            shrink_divisor: 0,
            ..Self::default()
        }
    }

    /// Shrink as soon as more than half the slots are idle, keeping room to
    /// double before the next growth.
    pub fn aggressive() -> Self {
        Self {
            growth_factor: 2,
            shrink_divisor: 2,
            shrink_headroom: 2,
            min_capacity: 1,
        }
    }

    /// Checks that the policy can make progress without thrashing.
    ///
    /// A policy that shrinks to exactly `len` (`shrink_headroom < 2`) while a
    /// single growth already crosses the shrink threshold
    /// (`growth_factor >= shrink_divisor`) would reallocate on every push and
    /// every pop at the boundary, so it is rejected.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.growth_factor < 2 {
            return Err("growth_factor must be at least 2");
        }
        if self.min_capacity == 0 {
            return Err("min_capacity must be non-zero");
        }
        if self.shrink_headroom == 0 {
            return Err("shrink_headroom must be non-zero");
        }
        if self.shrink_divisor != 0
            && self.shrink_headroom < 2
            && self.growth_factor >= self.shrink_divisor
        {
            return Err("shrink_headroom < 2 needs shrink_divisor > growth_factor");
        }
        Ok(())
    }

    /// Capacity to grow to before appending to a buffer with `capacity` slots.
    ///
    /// `None` when the multiplication overflows.
    #[inline]
    pub(crate) fn grown(&self, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            Some(self.min_capacity)
        } else {
            capacity.checked_mul(self.growth_factor)
        }
    }

    /// Capacity to shrink to, or `None` when there is not enough slack.
    #[inline]
    pub(crate) fn shrunk(&self, len: usize, capacity: usize) -> Option<usize> {
        if capacity == 0 || self.shrink_divisor == 0 {
            return None;
        }
        if len > capacity / self.shrink_divisor {
            return None;
        }
        let target = len.saturating_mul(self.shrink_headroom).max(self.min_capacity);
        (target < capacity).then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_growth() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.grown(0), Some(1));
        assert_eq!(policy.grown(1), Some(2));
        assert_eq!(policy.grown(512), Some(1024));
        assert_eq!(policy.grown(usize::MAX), None);
    }

    #[test]
    fn test_default_shrink_threshold() {
        let policy = CapacityPolicy::default();
        // 16 / 4 = 4: five live elements keep the block
        assert_eq!(policy.shrunk(5, 16), None);
        assert_eq!(policy.shrunk(4, 16), Some(8));
        assert_eq!(policy.shrunk(0, 16), Some(1));
        assert_eq!(policy.shrunk(0, 0), None);
    }

    #[test]
    fn test_shrink_never_grows() {
        let policy = CapacityPolicy::default();
        // 0 <= 1 / 4 but max(1, 0) == 1 is not smaller
        assert_eq!(policy.shrunk(0, 1), None);
    }

    #[test]
    fn test_presets_validate() {
        assert!(CapacityPolicy::default().validate().is_ok());
        assert!(CapacityPolicy::never_shrink().validate().is_ok());
        assert!(CapacityPolicy::aggressive().validate().is_ok());
        assert_eq!(CapacityPolicy::never_shrink().shrunk(0, 64), None);
    }

    #[test]
    fn test_invalid_policy() {
        let policy = CapacityPolicy {
            growth_factor: 1,
            ..CapacityPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = CapacityPolicy {
            min_capacity: 0,
            ..CapacityPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_thrashing_policy_rejected() {
        let tight = CapacityPolicy {
            growth_factor: 2,
            shrink_divisor: 2,
            shrink_headroom: 1,
            min_capacity: 1,
        };
        assert!(tight.validate().is_err());

        // A divisor above the growth factor keeps a fresh growth clear of
        // the shrink threshold.
        let spaced = CapacityPolicy {
            shrink_divisor: 3,
            ..tight
        };
        assert!(spaced.validate().is_ok());

        let never = CapacityPolicy {
            shrink_divisor: 0,
            ..tight
        };
        assert!(never.validate().is_ok());
    }

    #[test]
    fn test_aggressive_growth_does_not_cross_threshold() {
        let policy = CapacityPolicy::aggressive();
        let grown = policy.grown(1024).unwrap();
        assert_eq!(policy.shrunk(1024, grown), None);
        assert_eq!(policy.shrunk(511, 1024), Some(1022));
    }
}
