//! Shared test fixtures: a deterministic keymap for the statistics core.

use crate::keysym::{Keymap, Keysym, ModifierMask};
use std::collections::HashMap;

/// X-style modifier bits used by the fake layout.
pub const SHIFT_BIT: ModifierMask = 0x01; // ShiftMask
pub const LOCK_BIT: ModifierMask = 0x02; // LockMask
pub const LEVEL3_BIT: ModifierMask = 0x80; // Mod5Mask

/// Keycodes in the fake layout.
pub const KEY_A: u32 = 10;
pub const KEY_B: u32 = 11;
pub const KEY_C: u32 = 12;
pub const KEY_SHIFT: u32 = 50;
pub const KEY_CAPS: u32 = 66;
pub const KEY_LEVEL3: u32 = 108;
pub const KEY_UNMAPPED: u32 = 200;

/// Fixed minimal layout: three letter keys with four levels each, plus the
/// three level-affecting modifier keys. Level 2/3 symbols are deliberately
/// unnamed so tests cover the hex fallback.
pub struct FakeKeymap {
    keys: HashMap<u32, [Keysym; 4]>,
    modifiers: HashMap<Keysym, ModifierMask>,
    names: HashMap<Keysym, &'static str>,
}

impl FakeKeymap {
    pub fn new() -> Self {
        let mut keys = HashMap::new();
        keys.insert(
            KEY_A,
            [Keysym(0x61), Keysym(0x41), Keysym(0x1061), Keysym(0x1041)],
        );
        keys.insert(
            KEY_B,
            [Keysym(0x62), Keysym(0x42), Keysym(0x1062), Keysym(0x1042)],
        );
        keys.insert(
            KEY_C,
            [Keysym(0x63), Keysym(0x43), Keysym(0x1063), Keysym(0x1043)],
        );
        keys.insert(KEY_SHIFT, [Keysym::SHIFT_L; 4]);
        keys.insert(KEY_CAPS, [Keysym::CAPS_LOCK; 4]);
        keys.insert(KEY_LEVEL3, [Keysym::ISO_LEVEL3_SHIFT; 4]);

        let mut modifiers = HashMap::new();
        modifiers.insert(Keysym::SHIFT_L, SHIFT_BIT);
        modifiers.insert(Keysym::CAPS_LOCK, LOCK_BIT);
        modifiers.insert(Keysym::ISO_LEVEL3_SHIFT, LEVEL3_BIT);

        let mut names = HashMap::new();
        names.insert(Keysym(0x61), "a");
        names.insert(Keysym(0x41), "A");
        names.insert(Keysym(0x62), "b");
        names.insert(Keysym(0x42), "B");
        names.insert(Keysym(0x63), "c");
        names.insert(Keysym(0x43), "C");
        names.insert(Keysym::SHIFT_L, "Shift_L");
        names.insert(Keysym::CAPS_LOCK, "Caps_Lock");
        names.insert(Keysym::ISO_LEVEL3_SHIFT, "ISO_Level3_Shift");

        Self {
            keys,
            modifiers,
            names,
        }
    }
}

impl Keymap for FakeKeymap {
    fn symbol_at(&self, keycode: u32, _group: u8, level: u8) -> Keysym {
        self.keys
            .get(&keycode)
            .map(|levels| levels[usize::from(level).min(3)])
            .unwrap_or(Keysym::NO_SYMBOL)
    }

    fn modifier_bits(&self, sym: Keysym) -> ModifierMask {
        self.modifiers.get(&sym).copied().unwrap_or(0)
    }

    fn symbol_name(&self, sym: Keysym) -> Option<String> {
        self.names.get(&sym).map(|name| (*name).to_string())
    }
}
