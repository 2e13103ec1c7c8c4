//! User interface: drawing, rendering and key handling.
//!
//! - **draw**: straight lines built from cursor moves
//! - **renderer**: intro screen and cursor position status line
//! - **keymapper**: input bytes to steering actions

pub mod draw;
pub mod keymapper;
pub mod renderer;

pub use keymapper::{Action, KeyMapper};
pub use renderer::Renderer;
