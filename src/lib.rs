//! # keytally
//!
//! Passive keyboard statistics: observe key presses, resolve each to a
//! canonical keysym under the tracked modifier state, and keep running
//! unigram/digram/trigram frequency tables that are dumped to a text sink
//! and reset every N presses.
//!
//! ## Quick Start
//!
//! The statistics core is backend-independent:
//!
//! ```
//! use keytally::{FrequencyTable, Keysym};
//!
//! let mut table = FrequencyTable::new();
//! table.increment(Keysym(0x61));
//! table.increment(Keysym(0x61));
//! table.increment(Keysym(0x62));
//! assert_eq!(table.count(Keysym(0x61)), 2);
//! assert_eq!(table.total(), 3);
//! ```
//!
//! Capturing real events needs the `x11` feature (XRecord backend):
//!
//! ```ignore
//! use keytally::{platform, EventPump, StatsCollector, SymbolResolver};
//!
//! let keymap = platform::keymap()?;
//! let resolver = SymbolResolver::new(keymap, false);
//! let collector = StatsCollector::new(resolver, 1000, std::io::stdout());
//! let (handle, events) = platform::capture()?;
//! EventPump::new(events, collector).run()?;
//! # keytally::Result::Ok(())
//! ```
//!
//! ## Architecture
//!
//! One thread, the event pump, owns every piece of mutable statistics
//! state (modifier mask, symbol history, press counter, frequency tables)
//! and drains the capture channel sequentially. A second thread waits for
//! a termination signal and disables the capture source, which disconnects
//! the channel and lets the pump finish. No statistics state is shared
//! between threads, so none of it is locked.

pub mod collector;
pub mod error;
pub mod history;
pub mod keysym;
pub mod modifier;
pub mod platform;
pub mod pump;
pub mod resolve;
pub mod shutdown;
pub mod source;
pub mod table;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports
pub use collector::StatsCollector;
pub use error::{Error, Result};
pub use history::SymbolHistory;
pub use keysym::{Keymap, Keysym, ModifierMask};
pub use modifier::ModifierTracker;
pub use pump::EventPump;
pub use resolve::SymbolResolver;
pub use shutdown::{ShutdownCoordinator, ShutdownPhase};
pub use source::{EventAction, EventClass, SourceControl, SourceEvent};
pub use table::{FrequencyNode, FrequencyTable, INDENT, SEPARATOR};
