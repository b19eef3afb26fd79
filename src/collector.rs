//! Per-press statistics bookkeeping.

use crate::error::Result;
use crate::history::SymbolHistory;
use crate::keysym::{Keymap, ModifierMask};
use crate::modifier::ModifierTracker;
use crate::resolve::SymbolResolver;
use crate::table::{FrequencyTable, SEPARATOR};
use std::io::Write;

/// Owns every piece of statistics state: the modifier tracker, the symbol
/// history, the frequency tables and the press counter.
///
/// All of it is mutated from a single thread (the event pump), so no
/// locking is involved and the dump-then-reset at the threshold happens
/// before any later increment. A pump fed by multiple producer threads
/// would have to add mutual exclusion around [`on_press`](Self::on_press).
pub struct StatsCollector<M, W> {
    resolver: SymbolResolver<M>,
    tracker: ModifierTracker,
    history: SymbolHistory,
    table: FrequencyTable,
    presses: u64,
    threshold: u64,
    digrams: bool,
    trigrams: bool,
    sink: W,
}

impl<M: Keymap, W: Write> StatsCollector<M, W> {
    /// `threshold` is the number of presses per dump window. Digram and
    /// trigram tracking start enabled.
    pub fn new(resolver: SymbolResolver<M>, threshold: u64, sink: W) -> Self {
        Self {
            resolver,
            tracker: ModifierTracker::new(),
            history: SymbolHistory::new(),
            table: FrequencyTable::new(),
            presses: 0,
            threshold,
            digrams: true,
            trigrams: true,
            sink,
        }
    }

    /// Enable or disable digram tracking (disabling it also stops trigrams,
    /// which extend the digram paths).
    pub fn with_digrams(mut self, enabled: bool) -> Self {
        self.digrams = enabled;
        self
    }

    /// Enable or disable trigram tracking.
    pub fn with_trigrams(mut self, enabled: bool) -> Self {
        self.trigrams = enabled;
        self
    }

    /// Fold the key's own modifier contribution into the mask. Called for
    /// every key-class event, press and release alike.
    pub fn track_modifiers(&mut self, keycode: u32) {
        let base = self.resolver.base_symbol(keycode);
        let contribution = self.resolver.modifier_contribution(base);
        self.tracker.toggle(contribution);
    }

    /// Account one key press: resolve the symbol, update the history and
    /// the unigram/digram/trigram paths, and dump + reset once the window
    /// fills.
    pub fn on_press(&mut self, keycode: u32) -> Result<()> {
        let sym = self.resolver.resolve(keycode, self.tracker.mask());
        self.history.push(sym);
        self.presses += 1;

        self.table.increment(sym);

        // The n-gram guards count presses within the current window, not
        // history depth: after a reset the table is empty, so a digram
        // through a pre-reset symbol would have no ancestor node.
        if self.digrams
            && self.presses > 1
            && let Some(prev) = self.history.at(1)
        {
            self.table.ensure_child(prev)?.increment(sym);

            if self.trigrams
                && self.presses > 2
                && let Some(prev2) = self.history.at(2)
            {
                // The previous press's digram step created prev2's child
                // table and prev's node inside it.
                self.table
                    .ensure_child(prev2)?
                    .ensure_child(prev)?
                    .increment(sym);
            }
        }

        if self.presses == self.threshold {
            self.dump_and_reset()?;
        }
        Ok(())
    }

    /// Serialize the whole model to the sink, write the separator line,
    /// flush, and start a fresh window.
    pub fn dump_and_reset(&mut self) -> Result<()> {
        let resolver = &self.resolver;
        self.table
            .dump(&mut self.sink, 0, &|sym| resolver.symbol_name(sym))?;
        writeln!(self.sink, "{SEPARATOR}")?;
        self.sink.flush()?;
        self.table.reset();
        self.presses = 0;
        log::debug!("frequency table dumped, window reset");
        Ok(())
    }

    /// Presses observed since the last reset.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Current accumulated modifier mask.
    pub fn modifier_mask(&self) -> ModifierMask {
        self.tracker.mask()
    }

    /// The root frequency table of the current window.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Hand the sink back, e.g. to inspect dumped output.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keysym::Keysym;
    use crate::table::INDENT;
    use crate::testutil::{FakeKeymap, KEY_A, KEY_B, KEY_C, KEY_SHIFT, KEY_UNMAPPED};

    const A: Keysym = Keysym(0x61);
    const B: Keysym = Keysym(0x62);
    const C: Keysym = Keysym(0x63);
    const SHIFTED_A: Keysym = Keysym(0x41);

    fn collector(threshold: u64) -> StatsCollector<FakeKeymap, Vec<u8>> {
        let resolver = SymbolResolver::new(FakeKeymap::new(), false);
        StatsCollector::new(resolver, threshold, Vec::new())
    }

    fn press_all(c: &mut StatsCollector<FakeKeymap, Vec<u8>>, keycodes: &[u32]) {
        for &keycode in keycodes {
            c.on_press(keycode).unwrap();
        }
    }

    #[test]
    fn counts_unigrams_and_digrams() {
        // Scenario: presses a, b, a with a window too large to trigger.
        let mut c = collector(100);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_A]);

        assert_eq!(c.table().count(A), 2);
        assert_eq!(c.table().count(B), 1);
        assert_eq!(c.table().child(A).unwrap().count(B), 1);
        assert_eq!(c.table().child(B).unwrap().count(A), 1);
        assert_eq!(c.presses(), 3);
    }

    #[test]
    fn counts_trigrams_after_three_presses() {
        // a b a b a: digrams a->b x2 and b->a x2; trigrams fire at presses
        // 3, 4 and 5 only.
        let mut c = collector(100);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_A, KEY_B, KEY_A]);

        assert_eq!(c.table().count(A), 3);
        assert_eq!(c.table().count(B), 2);
        assert_eq!(c.table().total(), 5);
        assert_eq!(c.table().child(A).unwrap().count(B), 2);
        assert_eq!(c.table().child(B).unwrap().count(A), 2);
        assert_eq!(c.table().child(A).unwrap().child(B).unwrap().count(A), 2);
        assert_eq!(c.table().child(B).unwrap().child(A).unwrap().count(B), 1);
    }

    #[test]
    fn trigrams_over_three_distinct_symbols() {
        let mut c = collector(100);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_C]);

        assert_eq!(c.table().child(A).unwrap().count(B), 1);
        assert_eq!(c.table().child(B).unwrap().count(C), 1);
        assert_eq!(c.table().child(A).unwrap().child(B).unwrap().count(C), 1);
    }

    #[test]
    fn threshold_triggers_dump_and_reset() {
        let mut c = collector(3);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_A]);

        assert!(c.table().is_empty());
        assert_eq!(c.presses(), 0);

        let text = String::from_utf8(c.into_sink()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(*lines.last().unwrap(), SEPARATOR);
        assert!(lines.contains(&"a:2"));
        assert!(lines.contains(&"b:1"));
        let digram_a_b = format!("{INDENT}b:1");
        let digram_b_a = format!("{INDENT}a:1");
        assert!(lines.contains(&digram_a_b.as_str()));
        assert!(lines.contains(&digram_b_a.as_str()));
    }

    #[test]
    fn ngram_state_does_not_cross_windows() {
        let mut c = collector(2);
        press_all(&mut c, &[KEY_A, KEY_B]);
        assert!(c.table().is_empty());

        // History still holds pre-reset symbols, but the fresh window must
        // not record a digram through them: their nodes are gone.
        c.on_press(KEY_B).unwrap();
        assert_eq!(c.table().count(B), 1);
        assert!(c.table().child(B).is_none());
        assert_eq!(c.presses(), 1);
    }

    #[test]
    fn root_counts_sum_to_the_window_size_at_dump_time() {
        let mut c = collector(100);
        press_all(&mut c, &[KEY_A, KEY_A, KEY_B, KEY_A, KEY_B, KEY_B, KEY_A]);
        assert_eq!(c.table().total(), 7);
    }

    #[test]
    fn unknown_keycodes_count_in_an_unknown_bucket() {
        let mut c = collector(100);
        press_all(&mut c, &[KEY_UNMAPPED, KEY_A]);

        assert_eq!(c.table().count(Keysym::NO_SYMBOL), 1);
        // The unknown symbol participates in digram context like any other.
        assert_eq!(c.table().child(Keysym::NO_SYMBOL).unwrap().count(A), 1);
    }

    #[test]
    fn shifted_presses_count_shifted_symbols() {
        let mut c = collector(100);
        // Shift press toggles the mask and counts as Shift_L itself.
        c.track_modifiers(KEY_SHIFT);
        c.on_press(KEY_SHIFT).unwrap();
        c.track_modifiers(KEY_A);
        c.on_press(KEY_A).unwrap();
        // Shift release untoggles.
        c.track_modifiers(KEY_SHIFT);
        c.track_modifiers(KEY_A);
        c.on_press(KEY_A).unwrap();

        assert_eq!(c.table().count(Keysym::SHIFT_L), 1);
        assert_eq!(c.table().count(SHIFTED_A), 1);
        assert_eq!(c.table().count(A), 1);
        assert_eq!(c.modifier_mask(), 0);
    }

    #[test]
    fn digrams_can_be_disabled() {
        let mut c = collector(100).with_digrams(false);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_A]);

        assert_eq!(c.table().count(A), 2);
        assert!(c.table().child(A).is_none());
        assert!(c.table().child(B).is_none());
    }

    #[test]
    fn trigrams_can_be_disabled_independently() {
        let mut c = collector(100).with_trigrams(false);
        press_all(&mut c, &[KEY_A, KEY_B, KEY_A]);

        assert_eq!(c.table().child(B).unwrap().count(A), 1);
        assert!(c.table().child(B).unwrap().child(A).is_none());
    }

    #[test]
    fn manual_dump_writes_separator_and_flushes_counts() {
        let mut c = collector(100);
        press_all(&mut c, &[KEY_A]);
        c.dump_and_reset().unwrap();
        assert!(c.table().is_empty());
        assert_eq!(c.presses(), 0);

        let text = String::from_utf8(c.into_sink()).unwrap();
        assert_eq!(text, format!("a:1\n{SEPARATOR}\n"));
    }
}
