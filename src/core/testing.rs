//! In-memory terminal used by the unit tests.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use rustix::termios::{ControlModes, InputModes, LocalModes, OutputModes};

use super::tty::{TerminalDevice, TerminalSettings, WindowSize};

/// Scripted terminal: input bytes are queued up front, every write call is logged.
#[derive(Debug)]
pub struct FakeTerminal {
    pub input: VecDeque<u8>,
    pub writes: Vec<Vec<u8>>,
    /// Index of the write call that only accepts all but its last byte.
    pub short_write_at: Option<usize>,
    pub settings: TerminalSettings,
    pub applied: Vec<TerminalSettings>,
    pub fail_settings_read: bool,
    pub fail_settings_apply: bool,
    /// `None` makes the window size query fail.
    pub window: Option<WindowSize>,
}

impl FakeTerminal {
    pub fn new() -> Self {
        Self {
            input: VecDeque::new(),
            writes: Vec::new(),
            short_write_at: None,
            settings: cooked_settings(),
            applied: Vec::new(),
            fail_settings_read: false,
            fail_settings_apply: false,
            window: None,
        }
    }

    pub fn with_input(bytes: &[u8]) -> Self {
        let mut term = Self::new();
        term.push_input(bytes);
        term
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Everything written so far, concatenated.
    pub fn output(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn count_writes(&self, bytes: &[u8]) -> usize {
        self.writes.iter().filter(|w| w.as_slice() == bytes).count()
    }
}

/// Typical settings of an interactive shell's terminal.
pub fn cooked_settings() -> TerminalSettings {
    TerminalSettings {
        input: InputModes::BRKINT | InputModes::ICRNL | InputModes::IXON | InputModes::IXANY,
        output: OutputModes::OPOST | OutputModes::ONLCR,
        control: ControlModes::CS7 | ControlModes::PARENB | ControlModes::CREAD,
        local: LocalModes::ECHO
            | LocalModes::ECHOE
            | LocalModes::ECHOK
            | LocalModes::ICANON
            | LocalModes::ISIG
            | LocalModes::IEXTEN,
    }
}

impl Read for FakeTerminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.input.pop_front() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl Write for FakeTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = if self.short_write_at == Some(self.writes.len()) {
            buf.len().saturating_sub(1)
        } else {
            buf.len()
        };
        self.writes.push(buf[..accepted].to_vec());
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TerminalDevice for FakeTerminal {
    fn settings(&self) -> io::Result<TerminalSettings> {
        if self.fail_settings_read {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "not a terminal"));
        }
        Ok(self.settings)
    }

    fn apply_settings(&mut self, settings: &TerminalSettings) -> io::Result<()> {
        if self.fail_settings_apply {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "rejected"));
        }
        self.settings = *settings;
        self.applied.push(*settings);
        Ok(())
    }

    fn window_size(&self) -> io::Result<WindowSize> {
        self.window
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "no window size"))
    }
}
