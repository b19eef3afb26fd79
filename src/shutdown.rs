//! Signal-driven shutdown coordination.
//!
//! The coordinator runs beside the event pump and never touches statistics
//! state. It waits on a channel fed by the process signal handler and, when
//! a termination signal arrives, disables the event source; that
//! disconnects the event channel and lets the pump's receive loop return.

use crate::error::Result;
use crate::source::SourceControl;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Lifecycle of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    /// Waiting for a termination signal.
    Armed,
    /// A termination signal arrived.
    SignalReceived,
    /// The stop request has been issued to the event source.
    RequestedStop,
    /// Terminal; the coordinating thread is done.
    Stopped,
}

/// Waits for a termination signal, then stops the event source.
pub struct ShutdownCoordinator {
    signals: Receiver<()>,
    phase: ShutdownPhase,
}

impl ShutdownCoordinator {
    /// Install a process-wide SIGINT/SIGTERM handler that feeds the
    /// coordinator's signal channel. Can only be done once per process.
    pub fn arm() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })?;
        Ok(Self::with_signals(rx))
    }

    /// Coordinator over an arbitrary signal channel.
    pub fn with_signals(signals: Receiver<()>) -> Self {
        Self {
            signals,
            phase: ShutdownPhase::Armed,
        }
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    /// Block until a signal arrives, then disable the source. A failed
    /// disable is logged; it must not keep the process from exiting.
    pub fn run(&mut self, control: &dyn SourceControl) {
        log::debug!("shutdown coordinator armed");
        if self.signals.recv().is_err() {
            // All senders gone; the process is going down some other way.
            self.phase = ShutdownPhase::Stopped;
            return;
        }
        self.phase = ShutdownPhase::SignalReceived;
        log::info!("termination signal received, stopping event capture");

        self.phase = ShutdownPhase::RequestedStop;
        if let Err(e) = control.disable() {
            log::error!("failed to disable event capture: {e}");
        }

        self.phase = ShutdownPhase::Stopped;
        log::debug!("shutdown coordinator exiting");
    }

    /// Run the coordinator on its own thread, taking ownership of the
    /// source control handle. The returned handle yields the final phase.
    pub fn spawn<C>(mut self, control: C) -> JoinHandle<ShutdownPhase>
    where
        C: SourceControl + 'static,
    {
        thread::spawn(move || {
            self.run(&control);
            self.phase
        })
    }
}
