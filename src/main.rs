//! vtcursor - raw-mode cursor control over VT100 escape sequences
//!
//! vtcursor puts the terminal into raw mode, measures the screen, draws a cross
//! through its middle and lets you steer the cursor around while a status line
//! reports where it is. Everything is done with plain escape sequences: cursor
//! position queries, one-cell relative moves and the home sequence.
//!
//! # Quick Start
//!
//! ```text
//! vtcursor                 # Start an interactive session
//! vtcursor --init-config   # Write ~/.vtcursor/config.toml with defaults
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | w / Up | Move up |
//! | s / Down | Move down |
//! | a / Left | Move left |
//! | d / Right | Move right |
//! | q / Ctrl+C | Quit |

mod config;
mod core;
mod ui;

use std::env;
use std::fs;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::core::cursor::CursorProtocol;
use crate::core::error::TermError;
use crate::core::raw_mode::RawMode;
use crate::core::signals::SignalRestorer;
use crate::core::size;
use crate::core::tty::Tty;
use crate::ui::{Action, KeyMapper, Renderer};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    /// Write a default config file and exit
    init_config: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("vtcursor {}", VERSION);
}

fn print_help() {
    eprintln!("vtcursor {} - Raw-mode cursor control over VT100 escape sequences", VERSION);
    eprintln!();
    eprintln!("Usage: vtcursor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --init-config         Write default config to ~/.vtcursor/config.toml");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  w, Up arrow           Move cursor up");
    eprintln!("  s, Down arrow         Move cursor down");
    eprintln!("  a, Left arrow         Move cursor left");
    eprintln!("  d, Right arrow        Move cursor right");
    eprintln!("  q, Ctrl+C             Quit");
    eprintln!();
    eprintln!("Configuration: ~/.vtcursor/config.toml");
    eprintln!("Log file:      ~/.vtcursor/vtcursor.log");
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--init-config" => {
                args.init_config = true;
            }
            other => {
                return Err(format!("Unknown argument: {}. Use -h for help.", other));
            }
        }
    }

    Ok(args)
}

/// Log to a file; stdout is the terminal being driven.
fn init_logging(level: &str) {
    let log_path = Config::get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    if args.init_config {
        let path = Config::default().save()?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.log_level);
    if let Some(e) = config_error {
        warn!("Using default config: {:#}", e);
    }

    info!("vtcursor {} starting...", VERSION);
    run(&config)
}

/// Run an interactive session on the controlling terminal
fn run(config: &Config) -> anyhow::Result<()> {
    let tty = Tty::new();
    if !tty.is_tty() {
        anyhow::bail!("vtcursor must be run in a terminal (stdin and stdout)");
    }

    let mut term = RawMode::enter(tty).context("failed to enter raw mode")?;

    // Kept alive for the whole session
    let _restorer = match SignalRestorer::spawn(*term.pristine()) {
        Ok(restorer) => Some(restorer),
        Err(e) => {
            warn!("Signal restore unavailable: {}", e);
            None
        }
    };

    let renderer = Renderer::new(config);
    renderer.draw_help(&mut *term)?;

    let size = size::detect(&mut *term, config.probe_distance)
        .context("failed to detect terminal size")?;
    info!("Terminal size: {}x{}", size.width, size.height);

    renderer.draw_cross(&mut *term, size)?;

    run_main_loop(&mut *term, &renderer)?;

    let last = term
        .query_position()
        .context("failed to read final cursor position")?;
    term.exit().context("failed to restore terminal settings")?;

    println!(
        "\n\nx_position = {}, y_position = {}\nterminal_width={}, terminal_height={}",
        last.col, last.row, size.width, size.height
    );
    info!("Session ended");
    Ok(())
}

/// Steer the cursor until quit or end of input
fn run_main_loop<T>(io: &mut T, renderer: &Renderer) -> anyhow::Result<()>
where
    T: CursorProtocol + ?Sized,
{
    loop {
        let action = match KeyMapper::read_action(io) {
            Ok(action) => action,
            Err(TermError::Eof) => {
                info!("Input closed");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Quit => {
                info!("Quit requested");
                break;
            }
            Action::Move(direction) => io.move_relative(direction, 1)?,
            Action::Ignore => {}
        }

        // Keystrokes typed ahead of the reply garble it; skip this refresh
        let pos = match io.query_position() {
            Ok(pos) => pos,
            Err(TermError::MalformedResponse(reply)) => {
                warn!("Skipping status refresh, bad position reply: {}", reply);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Cursor at {}x{}", pos.col, pos.row);
        renderer.render_status(io, pos)?;
    }

    Ok(())
}
