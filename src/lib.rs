//! Problembuddy: a terminal launchpad for web applications.
//!
//! The catalog is rendered as a searchable grid or list of cards. Entries
//! can be favorited, and a details dialog sits in front of every launch
//! until the user asks not to see it again. Preferences persist in SQLite.

pub mod app;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod keybindings;
pub mod launcher;
pub mod modal;
pub mod preferences;
pub mod search;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
pub mod view;
