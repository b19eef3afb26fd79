//! Event source interface types.
//!
//! A source delivers an ordered stream of press/release events into a
//! channel and exposes a control handle that can stop delivery from another
//! thread.

use crate::error::Result;

/// Device class of a source event. Only key-class events participate in
/// modifier tracking and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Key,
    Pointer,
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Press,
    Release,
}

/// One raw event as delivered by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEvent {
    pub class: EventClass,
    pub action: EventAction,
    /// Device-specific keycode, or the button number for pointer events.
    pub code: u32,
}

impl SourceEvent {
    pub fn key_press(code: u32) -> Self {
        Self {
            class: EventClass::Key,
            action: EventAction::Press,
            code,
        }
    }

    pub fn key_release(code: u32) -> Self {
        Self {
            class: EventClass::Key,
            action: EventAction::Release,
            code,
        }
    }

    pub fn pointer_press(code: u32) -> Self {
        Self {
            class: EventClass::Pointer,
            action: EventAction::Press,
            code,
        }
    }

    pub fn pointer_release(code: u32) -> Self {
        Self {
            class: EventClass::Pointer,
            action: EventAction::Release,
            code,
        }
    }
}

/// Stop handle for an event source.
///
/// `disable` must be callable from a thread other than the delivery loop's
/// and must cause delivery to end promptly, disconnecting the event channel.
pub trait SourceControl: Send {
    fn disable(&self) -> Result<()>;
}
