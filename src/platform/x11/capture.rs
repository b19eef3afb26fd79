//! XRecord event capture.
//!
//! A capture thread owns the XRecord data connection and forwards raw
//! press/release events into an mpsc channel. Stopping works the way
//! XRecord requires: a separate control connection disables the record
//! context, which makes `XRecordEnableContext` return on the capture
//! thread; the thread then drops its channel sender, disconnecting the
//! receiver.

use crate::error::{Error, Result};
use crate::source::{SourceControl, SourceEvent};
use std::os::raw::{c_char, c_int, c_uchar, c_ulong};
use std::ptr::null;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;
use x11::xlib;
use x11::xrecord;

/// Channel feeding the pump; set for the lifetime of a capture run.
static SENDER: Mutex<Option<Sender<SourceEvent>>> = Mutex::new(None);

/// Flag checked by the record callback.
static STOP_FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

/// XRecord context, for disabling from the control connection.
static CONTEXT: Mutex<Option<xrecord::XRecordContext>> = Mutex::new(None);

const FALSE: c_int = 0;

/// Layout of the protocol data XRecord hands the callback.
#[repr(C)]
struct XRecordDatum {
    type_: u8,
    code: u8,
    _rest: u64,
    _1: bool,
    _2: bool,
    _3: bool,
    _root_x: i16,
    _root_y: i16,
    _event_x: i16,
    _event_y: i16,
    _state: u16,
}

/// Map a core protocol event to a source event.
fn convert_event(type_: c_int, code: u8) -> Option<SourceEvent> {
    match type_ {
        t if t == xlib::KeyPress => Some(SourceEvent::key_press(code as u32)),
        t if t == xlib::KeyRelease => Some(SourceEvent::key_release(code as u32)),
        t if t == xlib::ButtonPress => Some(SourceEvent::pointer_press(code as u32)),
        t if t == xlib::ButtonRelease => Some(SourceEvent::pointer_release(code as u32)),
        _ => None,
    }
}

/// XRecord callback, invoked on the capture thread.
unsafe extern "C" fn record_callback(
    _null: *mut c_char,
    raw_data: *mut xrecord::XRecordInterceptData,
) {
    unsafe {
        let data = match raw_data.as_ref() {
            Some(d) => d,
            None => return,
        };

        if data.category != xrecord::XRecordFromServer {
            xrecord::XRecordFreeData(raw_data);
            return;
        }

        // Drop events once a stop has been requested.
        if let Ok(guard) = STOP_FLAG.lock()
            && let Some(ref flag) = *guard
            && !flag.load(Ordering::SeqCst)
        {
            xrecord::XRecordFreeData(raw_data);
            return;
        }

        #[allow(clippy::cast_ptr_alignment)]
        let xdatum = match (data.data as *const XRecordDatum).as_ref() {
            Some(d) => d,
            None => {
                xrecord::XRecordFreeData(raw_data);
                return;
            }
        };

        if let Some(event) = convert_event(xdatum.type_ as c_int, xdatum.code)
            && let Ok(guard) = SENDER.lock()
            && let Some(ref sender) = *guard
        {
            let _ = sender.send(event);
        }

        xrecord::XRecordFreeData(raw_data);
    }
}

/// Body of the capture thread. Reports startup success or failure exactly
/// once through `ready`, then blocks in the record loop until disabled.
fn capture_thread(sender: Sender<SourceEvent>, ready: Sender<Result<()>>) {
    let startup = (|| -> Result<*mut xlib::Display> {
        {
            let mut guard = SENDER
                .lock()
                .map_err(|_| Error::ThreadError("sender mutex poisoned".into()))?;
            *guard = Some(sender);
        }

        unsafe {
            let dpy_data = xlib::XOpenDisplay(null());
            if dpy_data.is_null() {
                return Err(Error::CaptureStartFailed(
                    "failed to open X display; is $DISPLAY set?".into(),
                ));
            }

            let extension_name = c"RECORD";
            let extension = xlib::XInitExtension(dpy_data, extension_name.as_ptr());
            if extension.is_null() {
                xlib::XCloseDisplay(dpy_data);
                return Err(Error::CaptureStartFailed(
                    "XRecord extension not available".into(),
                ));
            }

            let mut record_range = *xrecord::XRecordAllocRange();
            record_range.device_events.first = xlib::KeyPress as c_uchar;
            record_range.device_events.last = xlib::ButtonRelease as c_uchar;

            let mut record_all_clients: c_ulong = xrecord::XRecordAllClients;
            let context = xrecord::XRecordCreateContext(
                dpy_data,
                0,
                &mut record_all_clients,
                1,
                &mut &mut record_range as *mut &mut xrecord::XRecordRange
                    as *mut *mut xrecord::XRecordRange,
                1,
            );

            if context == 0 {
                xlib::XCloseDisplay(dpy_data);
                return Err(Error::CaptureStartFailed(
                    "failed to create XRecord context".into(),
                ));
            }

            xlib::XSync(dpy_data, FALSE);

            {
                let mut guard = CONTEXT
                    .lock()
                    .map_err(|_| Error::ThreadError("context mutex poisoned".into()))?;
                *guard = Some(context);
            }

            Ok(dpy_data)
        }
    })();

    let dpy_data = match startup {
        Ok(dpy) => {
            let _ = ready.send(Ok(()));
            dpy
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            clear_statics();
            return;
        }
    };

    unsafe {
        let context = CONTEXT.lock().ok().and_then(|guard| *guard);
        if let Some(context) = context {
            // Blocks until the context is disabled from another connection.
            let result =
                xrecord::XRecordEnableContext(dpy_data, context, Some(record_callback), &mut 0);
            if result == 0 {
                log::error!("failed to enable XRecord context");
            }

            xrecord::XRecordDisableContext(dpy_data, context);
            xrecord::XRecordFreeContext(dpy_data, context);
        }
        xlib::XCloseDisplay(dpy_data);
    }

    // Dropping the stored sender disconnects the pump's receiver.
    clear_statics();
    log::debug!("capture thread exiting");
}

fn clear_statics() {
    if let Ok(mut guard) = SENDER.lock() {
        *guard = None;
    }
    if let Ok(mut guard) = STOP_FLAG.lock() {
        *guard = None;
    }
    if let Ok(mut guard) = CONTEXT.lock() {
        *guard = None;
    }
}

/// Start capturing key and button events.
///
/// Returns a control handle and the receiving end of the event channel.
/// Fails if the capture thread cannot establish its XRecord context, so
/// environment problems surface at startup rather than silently.
pub fn capture() -> Result<(CaptureHandle, Receiver<SourceEvent>)> {
    let (event_tx, event_rx) = mpsc::channel();
    let (ready_tx, ready_rx) = mpsc::channel();

    let running = Arc::new(AtomicBool::new(true));
    {
        let mut guard = STOP_FLAG
            .lock()
            .map_err(|_| Error::ThreadError("stop flag mutex poisoned".into()))?;
        *guard = Some(running.clone());
    }

    let thread = std::thread::spawn(move || {
        capture_thread(event_tx, ready_tx);
    });

    match ready_rx.recv() {
        Ok(Ok(())) => Ok((
            CaptureHandle {
                running,
                thread: RwLock::new(Some(thread)),
            },
            event_rx,
        )),
        Ok(Err(e)) => {
            let _ = thread.join();
            Err(e)
        }
        Err(_) => {
            let _ = thread.join();
            Err(Error::CaptureStartFailed(
                "capture thread exited before reporting readiness".into(),
            ))
        }
    }
}

/// Control handle for a running capture. Disabling is safe from any thread
/// and idempotent.
pub struct CaptureHandle {
    running: Arc<AtomicBool>,
    thread: RwLock<Option<JoinHandle<()>>>,
}

impl SourceControl for CaptureHandle {
    fn disable(&self) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(()); // already stopped
        }

        // XRecordDisableContext must come from a connection other than the
        // one blocked inside XRecordEnableContext.
        unsafe {
            let context = CONTEXT.lock().ok().and_then(|guard| *guard);
            if let Some(context) = context {
                let dpy_control = xlib::XOpenDisplay(null());
                if dpy_control.is_null() {
                    return Err(Error::CaptureStopFailed(
                        "failed to open control display".into(),
                    ));
                }
                xrecord::XRecordDisableContext(dpy_control, context);
                xlib::XSync(dpy_control, FALSE);
                xlib::XCloseDisplay(dpy_control);
            }
        }

        if let Ok(mut guard) = self.thread.write()
            && let Some(handle) = guard.take()
        {
            handle
                .join()
                .map_err(|_| Error::ThreadError("failed to join capture thread".into()))?;
        }

        Ok(())
    }
}
