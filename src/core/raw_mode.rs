//! Raw mode lifecycle
//!
//! [`enter`] returns the pristine settings it replaced; [`exit`] needs that snapshot
//! to restore them, so restoring without a prior successful entry cannot be
//! expressed. [`RawMode`] wraps both into a guard that restores on drop.
//!
//! While raw mode is active the terminal does no line editing, no echo and no
//! signal generation for control characters such as interrupt.

use std::ops::{Deref, DerefMut};

use rustix::termios::{ControlModes, InputModes, LocalModes, OutputModes};
use tracing::{debug, warn};

use super::error::{Result, TermError};
use super::tty::{TerminalDevice, TerminalSettings};

/// Compute raw settings from `settings`.
///
/// Input translation, flow control, parity marking and 8th-bit stripping are
/// turned off, as are output post-processing, echo, canonical mode, signal
/// generation and extended input processing. Characters are 8 bits, no parity.
pub fn raw_settings(settings: &TerminalSettings) -> TerminalSettings {
    let mut raw = *settings;

    raw.input.remove(
        InputModes::IGNBRK
            | InputModes::BRKINT
            | InputModes::PARMRK
            | InputModes::ISTRIP
            | InputModes::INLCR
            | InputModes::IGNCR
            | InputModes::ICRNL
            | InputModes::IXON,
    );
    raw.output.remove(OutputModes::OPOST);
    raw.local.remove(
        LocalModes::ECHO
            | LocalModes::ECHONL
            | LocalModes::ICANON
            | LocalModes::ISIG
            | LocalModes::IEXTEN,
    );
    raw.control.remove(ControlModes::CSIZE | ControlModes::PARENB);
    raw.control.insert(ControlModes::CS8);

    raw
}

/// Put `device` into raw mode and return the settings it had before.
///
/// If applying the raw settings fails the device is left untouched.
pub fn enter<D: TerminalDevice + ?Sized>(device: &mut D) -> Result<TerminalSettings> {
    let pristine = device.settings().map_err(TermError::TerminalQuery)?;
    let raw = raw_settings(&pristine);
    device
        .apply_settings(&raw)
        .map_err(TermError::TerminalConfigure)?;
    debug!("Raw mode entered");
    Ok(pristine)
}

/// Restore the `pristine` settings returned by [`enter`].
pub fn exit<D: TerminalDevice + ?Sized>(device: &mut D, pristine: &TerminalSettings) -> Result<()> {
    device
        .apply_settings(pristine)
        .map_err(TermError::TerminalConfigure)?;
    debug!("Raw mode exited");
    Ok(())
}

/// Scoped raw mode session.
///
/// Owns the device for the length of the session and dereferences to it. The
/// original settings are written back when the guard is dropped, including
/// during unwinding; call [`RawMode::exit`] to restore explicitly and observe
/// the result.
#[derive(Debug)]
pub struct RawMode<D: TerminalDevice> {
    device: D,
    pristine: TerminalSettings,
    restored: bool,
}

impl<D: TerminalDevice> RawMode<D> {
    pub fn enter(mut device: D) -> Result<Self> {
        let pristine = enter(&mut device)?;
        Ok(Self {
            device,
            pristine,
            restored: false,
        })
    }

    /// Settings that will be restored when the session ends.
    pub fn pristine(&self) -> &TerminalSettings {
        &self.pristine
    }

    /// End the session now, reporting a failed restore.
    pub fn exit(mut self) -> Result<()> {
        // Only one attempt, Drop must not retry
        self.restored = true;
        exit(&mut self.device, &self.pristine)
    }
}

impl<D: TerminalDevice> Deref for RawMode<D> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.device
    }
}

impl<D: TerminalDevice> DerefMut for RawMode<D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: TerminalDevice> Drop for RawMode<D> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(e) = exit(&mut self.device, &self.pristine) {
            warn!("Failed to restore terminal settings: {}", e);
        }
    }
}
