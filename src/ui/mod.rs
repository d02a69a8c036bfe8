//! Terminal User Interface module.
//!
//! This module provides the TUI for the launchpad, including:
//! - Main event loop (`run`)
//! - Keyboard and mouse input handling for browse, search and the details dialog
//! - Rendering of the catalog as a card grid or list
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `render` - Page layout and overlay dispatch
//! - `cards` - Grid and list renderers for catalog entries
//! - `modal` - Details dialog overlay
//! - `help` - Keybinding help overlay
//! - `status` - Status bar widget

mod cards;
mod help;
mod input;
mod loop_runner;
mod modal;
mod render;
mod status;

// Re-export the public API
pub use input::{handle_input, handle_mouse};
pub use loop_runner::{run, Action};
pub use render::render;
