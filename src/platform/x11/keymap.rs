//! Xkb-backed keyboard mapping.

use crate::error::{Error, Result};
use crate::keysym::{Keymap, Keysym, ModifierMask};
use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr::null;
use x11::xlib;

/// Keyboard mapping service over its own X control connection.
///
/// Used only from the event pump's thread; the capture thread never touches
/// this connection.
pub struct XkbKeymap {
    display: *mut xlib::Display,
}

impl XkbKeymap {
    /// Connect to the X server and verify the Xkb extension is present.
    pub fn open() -> Result<Self> {
        unsafe {
            let display = xlib::XOpenDisplay(null());
            if display.is_null() {
                return Err(Error::Keymap(
                    "failed to open X display; is $DISPLAY set?".into(),
                ));
            }

            let mut dummy: c_int = 0;
            if xlib::XkbQueryExtension(
                display, &mut dummy, &mut dummy, &mut dummy, &mut dummy, &mut dummy,
            ) == 0
            {
                xlib::XCloseDisplay(display);
                return Err(Error::Keymap("Xkb extension not available".into()));
            }

            Ok(Self { display })
        }
    }
}

impl Keymap for XkbKeymap {
    fn symbol_at(&self, keycode: u32, group: u8, level: u8) -> Keysym {
        let sym = unsafe {
            xlib::XkbKeycodeToKeysym(
                self.display,
                keycode as xlib::KeyCode,
                c_int::from(group) as _,
                c_int::from(level) as _,
            )
        };
        Keysym(sym as u32)
    }

    fn modifier_bits(&self, sym: Keysym) -> ModifierMask {
        unsafe { xlib::XkbKeysymToModifiers(self.display, sym.0 as xlib::KeySym) as ModifierMask }
    }

    fn symbol_name(&self, sym: Keysym) -> Option<String> {
        unsafe {
            let name = xlib::XKeysymToString(sym.0 as xlib::KeySym);
            if name.is_null() {
                None
            } else {
                Some(CStr::from_ptr(name).to_string_lossy().into_owned())
            }
        }
    }
}

impl Drop for XkbKeymap {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}
