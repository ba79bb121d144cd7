//! User interface rendering and input handling.
//!
//! This module provides the terminal front-end for a session:
//!
//! - **renderer**: Lays the surface out into rows and draws it with crossterm
//! - **keymapper**: Keyboard and mouse events to editing key mapping

pub mod keymapper;
pub mod renderer;

pub use keymapper::KeyMapper;
pub use renderer::Renderer;
