//! Keycode to keysym resolution under the tracked modifier mask.

use crate::keysym::{Keymap, Keysym, ModifierMask};

/// Resolves raw keycodes to canonical keysyms.
///
/// The shift level is derived additively from the mask: +1 when any shift
/// or caps-lock bit is set, +2 when a level-3-shift bit is set. This is a
/// two-axis approximation assuming a fairly normal layout, not a lookup
/// against the real per-key level table; shift and caps are not cancelled
/// against each other.
pub struct SymbolResolver<M> {
    keymap: M,
    shift_bits: ModifierMask,
    caps_bits: ModifierMask,
    level3_bits: ModifierMask,
    base_only: bool,
}

impl<M: Keymap> SymbolResolver<M> {
    /// `base_only` restricts resolution to level-0 symbols, which is useful
    /// for statistics on physical keys rather than typed symbols.
    pub fn new(keymap: M, base_only: bool) -> Self {
        let shift_bits = keymap.modifier_bits(Keysym::SHIFT_L);
        let caps_bits = keymap.modifier_bits(Keysym::CAPS_LOCK);
        let level3_bits = keymap.modifier_bits(Keysym::ISO_LEVEL3_SHIFT);
        Self {
            keymap,
            shift_bits,
            caps_bits,
            level3_bits,
            base_only,
        }
    }

    /// The level-0, group-0 symbol for `keycode`.
    pub fn base_symbol(&self, keycode: u32) -> Keysym {
        self.keymap.symbol_at(keycode, 0, 0)
    }

    /// The modifier bits `sym` itself would contribute as a modifier key.
    pub fn modifier_contribution(&self, sym: Keysym) -> ModifierMask {
        self.keymap.modifier_bits(sym)
    }

    /// Resolve `keycode` under `mask`.
    ///
    /// Modifier keys report their unshifted identity (modifiers are assumed
    /// to be one-level); everything else is translated at the derived
    /// level. Deterministic for identical arguments, and an unmapped
    /// keycode yields [`Keysym::NO_SYMBOL`] rather than failing.
    pub fn resolve(&self, keycode: u32, mask: ModifierMask) -> Keysym {
        let base = self.base_symbol(keycode);
        if self.base_only || self.modifier_contribution(base) != 0 {
            return base;
        }

        let mut level = 0;
        if mask & (self.shift_bits | self.caps_bits) != 0 {
            level += 1;
        }
        if mask & self.level3_bits != 0 {
            // Level-3 shift skips ahead by two.
            level += 2;
        }
        self.keymap.symbol_at(keycode, 0, level)
    }

    /// Reporting name for `sym`; falls back to the hex keysym value when
    /// the mapping has no name for it.
    pub fn symbol_name(&self, sym: Keysym) -> String {
        self.keymap
            .symbol_name(sym)
            .unwrap_or_else(|| sym.to_string())
    }
}
