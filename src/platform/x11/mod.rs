//! X11 backend: XRecord capture, Xkb keymap queries, daemonization.

mod capture;
mod daemon;
mod keymap;

pub use capture::{CaptureHandle, capture};
pub use daemon::daemonize;
pub use keymap::XkbKeymap;

use crate::error::Result;

/// Open the Xkb-backed keyboard mapping service.
pub fn keymap() -> Result<XkbKeymap> {
    XkbKeymap::open()
}
