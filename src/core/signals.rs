//! Terminal restoration on termination signals
//!
//! Raw mode turns off signal generation for control characters, but the process
//! can still be signalled from outside. A watcher thread puts the original
//! settings back before the signal's default action runs.

use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use signal_hook::low_level::emulate_default_handler;
use tracing::{debug, info, warn};

use super::tty::{TerminalDevice, TerminalSettings, Tty};

pub const RESTORE_SIGNALS: [i32; 4] = [SIGTERM, SIGINT, SIGHUP, SIGQUIT];

/// Watches for termination signals and restores `pristine` when one arrives.
///
/// Dropping the restorer unregisters the signals and stops the watcher.
pub struct SignalRestorer {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalRestorer {
    pub fn spawn(pristine: TerminalSettings) -> io::Result<Self> {
        let mut signals = Signals::new(RESTORE_SIGNALS)?;
        let handle = signals.handle();

        let thread = thread::Builder::new()
            .name("signal-restore".to_string())
            .spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    info!(signal = sig, "Received signal, restoring terminal");
                    let mut tty = Tty::new();
                    if let Err(e) = tty.apply_settings(&pristine) {
                        warn!("Failed to restore terminal on signal: {}", e);
                    }
                    if let Err(e) = emulate_default_handler(sig) {
                        warn!("Failed to run default handler for signal {}: {}", sig, e);
                    }
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for SignalRestorer {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Signal watcher panicked");
            }
        }
        debug!("Signal watcher stopped");
    }
}
