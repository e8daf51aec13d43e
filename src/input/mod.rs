pub mod handler;
pub mod menu;

pub use handler::{InputHandler, KeyAction};
pub use menu::{Menu, MenuAction, MenuItem};
