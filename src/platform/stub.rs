//! Stub backend for builds without an input backend enabled.

use crate::error::{Error, Result};
use crate::keysym::{Keymap, Keysym, ModifierMask};
use crate::source::{SourceControl, SourceEvent};
use std::sync::mpsc::Receiver;

/// Placeholder control handle; never observable in a running capture.
pub struct CaptureHandle;

impl SourceControl for CaptureHandle {
    fn disable(&self) -> Result<()> {
        Ok(())
    }
}

/// Placeholder keymap; never observable behind a successful `keymap()`.
pub struct NullKeymap;

impl Keymap for NullKeymap {
    fn symbol_at(&self, _keycode: u32, _group: u8, _level: u8) -> Keysym {
        Keysym::NO_SYMBOL
    }

    fn modifier_bits(&self, _sym: Keysym) -> ModifierMask {
        0
    }

    fn symbol_name(&self, _sym: Keysym) -> Option<String> {
        None
    }
}

pub fn capture() -> Result<(CaptureHandle, Receiver<SourceEvent>)> {
    Err(Error::NotSupported(
        "no capture backend enabled; build with the 'x11' feature".into(),
    ))
}

pub fn keymap() -> Result<NullKeymap> {
    Err(Error::NotSupported(
        "no keymap backend enabled; build with the 'x11' feature".into(),
    ))
}

pub fn daemonize() -> Result<()> {
    Err(Error::NotSupported(
        "daemonization requires a backend build; run with --foreground".into(),
    ))
}
