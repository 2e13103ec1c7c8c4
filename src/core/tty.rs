//! Controlling terminal access
//!
//! [`Tty`] talks to stdin/stdout directly through file descriptors, bypassing the
//! std buffers so every escape sequence reaches the device immediately.

use std::io::{self, Read, Write};

use crossterm::tty::IsTty;
use rustix::termios::{
    self, ControlModes, InputModes, LocalModes, OptionalActions, OutputModes, Termios,
};

/// Snapshot of the terminal line discipline flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSettings {
    pub input: InputModes,
    pub output: OutputModes,
    pub control: ControlModes,
    pub local: LocalModes,
}

impl TerminalSettings {
    fn from_termios(termios: &Termios) -> Self {
        Self {
            input: termios.input_modes,
            output: termios.output_modes,
            control: termios.control_modes,
            local: termios.local_modes,
        }
    }

    fn write_into(&self, termios: &mut Termios) {
        termios.input_modes = self.input;
        termios.output_modes = self.output;
        termios.control_modes = self.control;
        termios.local_modes = self.local;
    }
}

/// Window geometry as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

/// Operations on the terminal line discipline.
pub trait TerminalDevice {
    /// Read the current settings.
    fn settings(&self) -> io::Result<TerminalSettings>;

    /// Apply `settings`, discarding unread input and draining pending output first.
    fn apply_settings(&mut self, settings: &TerminalSettings) -> io::Result<()>;

    /// Ask the OS for the window size.
    fn window_size(&self) -> io::Result<WindowSize>;
}

impl<D: TerminalDevice + ?Sized> TerminalDevice for &mut D {
    fn settings(&self) -> io::Result<TerminalSettings> {
        (**self).settings()
    }

    fn apply_settings(&mut self, settings: &TerminalSettings) -> io::Result<()> {
        (**self).apply_settings(settings)
    }

    fn window_size(&self) -> io::Result<WindowSize> {
        (**self).window_size()
    }
}

/// The process's controlling terminal (stdin for input, stdout for output).
#[derive(Debug)]
pub struct Tty {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl Default for Tty {
    fn default() -> Self {
        Self::new()
    }
}

impl Tty {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    /// True if both streams are attached to a terminal.
    pub fn is_tty(&self) -> bool {
        self.stdin.is_tty() && self.stdout.is_tty()
    }
}

impl TerminalDevice for Tty {
    fn settings(&self) -> io::Result<TerminalSettings> {
        let termios = termios::tcgetattr(&self.stdin)?;
        Ok(TerminalSettings::from_termios(&termios))
    }

    fn apply_settings(&mut self, settings: &TerminalSettings) -> io::Result<()> {
        // Start from the live attributes so speeds and control characters are kept
        let mut termios = termios::tcgetattr(&self.stdin)?;
        settings.write_into(&mut termios);
        termios::tcsetattr(&self.stdin, OptionalActions::Flush, &termios)?;
        Ok(())
    }

    fn window_size(&self) -> io::Result<WindowSize> {
        let ws = termios::tcgetwinsize(&self.stdin)?;
        Ok(WindowSize {
            rows: ws.ws_row,
            cols: ws.ws_col,
        })
    }
}

impl Read for Tty {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(rustix::io::read(&self.stdin, buf)?)
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(rustix::io::write(&self.stdout, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
