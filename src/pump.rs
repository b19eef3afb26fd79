//! The event pump: drains the source channel and drives the collector.

use crate::collector::StatsCollector;
use crate::error::Result;
use crate::keysym::Keymap;
use crate::source::{EventAction, EventClass, SourceEvent};
use std::io::Write;
use std::sync::mpsc::Receiver;

/// Sequential, single-threaded consumer of source events.
///
/// Owns the collector, and through it all mutable statistics state. The
/// loop ends when the source side of the channel disconnects, which is what
/// disabling the source does.
pub struct EventPump<M, W> {
    events: Receiver<SourceEvent>,
    collector: StatsCollector<M, W>,
}

impl<M: Keymap, W: Write> EventPump<M, W> {
    pub fn new(events: Receiver<SourceEvent>, collector: StatsCollector<M, W>) -> Self {
        Self { events, collector }
    }

    /// Block on the channel until the source disconnects, feeding every
    /// key-class event through modifier tracking and every key press into
    /// the statistics. Pointer-class events are ignored.
    pub fn run(&mut self) -> Result<()> {
        while let Ok(event) = self.events.recv() {
            if event.class != EventClass::Key {
                continue;
            }
            self.collector.track_modifiers(event.code);
            if event.action == EventAction::Press {
                self.collector.on_press(event.code)?;
            }
        }
        log::debug!("event source disconnected, pump exiting");
        Ok(())
    }

    /// Hand the collector back, e.g. to inspect the partial window.
    pub fn into_collector(self) -> StatsCollector<M, W> {
        self.collector
    }
}
