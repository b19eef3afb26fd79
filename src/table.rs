//! Nested symbol frequency tables.
//!
//! A [`FrequencyTable`] maps symbols to counted nodes; each node may own a
//! child table one n-gram level deeper. The root holds unigram counts, its
//! children digram counts, and so on. Tables are reset as a whole after each
//! dump; no per-node deletion ever happens.

use crate::error::{Error, Result};
use crate::keysym::Keysym;
use std::collections::HashMap;
use std::io::Write;

/// Indent marker repeated once per nesting depth in dumps.
pub const INDENT: &str = "*   ";

/// Separator written to the sink after every dump.
pub const SEPARATOR: &str = "##########################################";

/// One counted symbol in a specific n-gram context.
#[derive(Debug)]
pub struct FrequencyNode {
    count: u64,
    children: Option<FrequencyTable>,
}

impl FrequencyNode {
    /// How often this context was observed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The table one n-gram level deeper, if any observation reached it.
    pub fn children(&self) -> Option<&FrequencyTable> {
        self.children.as_ref()
    }
}

/// Mapping of symbol to (count, optional deeper table).
///
/// A node exists iff its symbol was observed at least once in this table's
/// context; a child table exists only once a deeper n-gram through the node
/// was observed.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    entries: HashMap<Keysym, FrequencyNode>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observation of `sym`, creating the node with count 1 on
    /// first sight.
    pub fn increment(&mut self, sym: Keysym) {
        self.entries
            .entry(sym)
            .and_modify(|node| node.count += 1)
            .or_insert(FrequencyNode {
                count: 1,
                children: None,
            });
    }

    /// Child table under `sym`'s node, created empty on first use.
    ///
    /// Fails if `sym` has never been counted here; callers guarantee the
    /// node exists by incrementing it on an earlier press.
    pub fn ensure_child(&mut self, sym: Keysym) -> Result<&mut FrequencyTable> {
        let node = self
            .entries
            .get_mut(&sym)
            .ok_or(Error::MissingEntry(sym))?;
        Ok(node.children.get_or_insert_with(FrequencyTable::new))
    }

    /// Observed count for `sym`, zero if never seen.
    pub fn count(&self, sym: Keysym) -> u64 {
        self.entries.get(&sym).map_or(0, FrequencyNode::count)
    }

    /// Immutable child-table lookup.
    pub fn child(&self, sym: Keysym) -> Option<&FrequencyTable> {
        self.entries.get(&sym).and_then(FrequencyNode::children)
    }

    /// Sum of the counts at this level only.
    pub fn total(&self) -> u64 {
        self.entries.values().map(FrequencyNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recursively write one `name:count` line per node, indented by depth,
    /// each followed by its child table at depth + 1. Entry order within a
    /// level is unspecified.
    pub fn dump<W: Write>(
        &self,
        sink: &mut W,
        depth: usize,
        name: &dyn Fn(Keysym) -> String,
    ) -> std::io::Result<()> {
        for (sym, node) in &self.entries {
            for _ in 0..depth {
                write!(sink, "{INDENT}")?;
            }
            writeln!(sink, "{}:{}", name(*sym), node.count)?;
            if let Some(children) = &node.children {
                children.dump(sink, depth + 1, name)?;
            }
        }
        Ok(())
    }

    /// Discard every node and descendant table as one unit.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
