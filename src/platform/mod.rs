//! Capture backends.
//!
//! The X11 backend (feature `x11`, Linux only) captures events through
//! XRecord and answers keymap queries through Xkb. Without it, stubs keep
//! the crate building so the statistics core stays testable on hosts
//! without X11.

#[cfg(all(target_os = "linux", feature = "x11"))]
mod x11;
#[cfg(all(target_os = "linux", feature = "x11"))]
pub use x11::*;

#[cfg(not(all(target_os = "linux", feature = "x11")))]
mod stub;
#[cfg(not(all(target_os = "linux", feature = "x11")))]
pub use stub::*;
