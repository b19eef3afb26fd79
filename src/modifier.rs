//! Accumulated modifier mask tracking.

use crate::keysym::ModifierMask;

/// Tracks the modifier mask by XOR-toggling each observed key's modifier
/// contribution.
///
/// Every key-class event flips state, press and release alike. That is an
/// approximation of real keyboard state: if a modifier release is ever lost
/// or reordered the mask drifts from physical reality until the same key is
/// seen again.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    mask: ModifierMask,
}

impl ModifierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// XOR `contribution` into the mask. A zero contribution (any
    /// non-modifier symbol) leaves the mask untouched.
    pub fn toggle(&mut self, contribution: ModifierMask) {
        self.mask ^= contribution;
    }

    /// Current accumulated mask.
    pub fn mask(&self) -> ModifierMask {
        self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut tracker = ModifierTracker::new();
        tracker.toggle(0x1);
        assert_eq!(tracker.mask(), 0x1);
        tracker.toggle(0x1);
        assert_eq!(tracker.mask(), 0);
    }

    #[test]
    fn zero_contribution_is_a_no_op() {
        let mut tracker = ModifierTracker::new();
        tracker.toggle(0);
        assert_eq!(tracker.mask(), 0);
        tracker.toggle(0x2);
        tracker.toggle(0);
        assert_eq!(tracker.mask(), 0x2);
    }

    #[test]
    fn independent_bits_accumulate() {
        let mut tracker = ModifierTracker::new();
        tracker.toggle(0x1);
        tracker.toggle(0x80);
        assert_eq!(tracker.mask(), 0x81);
        tracker.toggle(0x1);
        assert_eq!(tracker.mask(), 0x80);
    }
}
