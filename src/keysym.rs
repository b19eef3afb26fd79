//! Keysym identifiers and the keyboard mapping capability.

use std::fmt;

/// Canonical identifier for a logical key, independent of the physical
/// keycode and of modifier state.
///
/// Wraps the X11 keysym value but carries no platform types of its own, so
/// the statistics core stays backend-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keysym(pub u32);

impl Keysym {
    /// What unmapped keycodes resolve to.
    pub const NO_SYMBOL: Keysym = Keysym(0);
    /// Left shift.
    pub const SHIFT_L: Keysym = Keysym(0xffe1);
    /// Caps lock.
    pub const CAPS_LOCK: Keysym = Keysym(0xffe5);
    /// ISO level-3 shift (AltGr on most layouts).
    pub const ISO_LEVEL3_SHIFT: Keysym = Keysym(0xfe03);
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Accumulated modifier state, as an X-style modifier bitmask.
pub type ModifierMask = u32;

/// Keyboard mapping capability: keycode to keysym at a given group and
/// shift level, plus the reverse queries the resolver needs.
pub trait Keymap {
    /// The keysym mapped at `(group, level)` for `keycode`, or
    /// [`Keysym::NO_SYMBOL`] if the keycode maps to nothing there.
    fn symbol_at(&self, keycode: u32, group: u8, level: u8) -> Keysym;

    /// The modifier bits `sym` would contribute if held as a modifier key.
    /// Zero for non-modifier symbols.
    fn modifier_bits(&self, sym: Keysym) -> ModifierMask;

    /// Human-readable name for `sym`, if the mapping knows one.
    fn symbol_name(&self, sym: Keysym) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_hex() {
        assert_eq!(Keysym(0x61).to_string(), "0x0061");
        assert_eq!(Keysym::NO_SYMBOL.to_string(), "0x0000");
        assert_eq!(Keysym(0x1008ff11).to_string(), "0x1008ff11");
    }
}
