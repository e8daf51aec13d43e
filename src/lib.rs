//! Cell Snake - the classic grid Snake game for the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard/mouse translation and clickable menus (input module)
//! - TUI rendering (render module)
//! - Per-session stats (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
