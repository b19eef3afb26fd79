//! Most-recent-symbol ring used to assemble n-grams.

use crate::keysym::Keysym;

/// How many symbols back the collector can look.
pub const HISTORY_LEN: usize = 3;

/// The last up-to-three resolved symbols, newest first.
#[derive(Debug, Default)]
pub struct SymbolHistory {
    slots: [Option<Keysym>; HISTORY_LEN],
}

impl SymbolHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, dropping the oldest entry beyond capacity.
    pub fn push(&mut self, sym: Keysym) {
        self.slots.rotate_right(1);
        self.slots[0] = Some(sym);
    }

    /// The i-th most recent symbol (0 = the latest push), or `None` if
    /// fewer than `i + 1` symbols have ever been pushed.
    pub fn at(&self, i: usize) -> Option<Keysym> {
        self.slots.get(i).copied().flatten()
    }
}
