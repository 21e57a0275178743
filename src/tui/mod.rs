//! TUI module - rendering and input handling

pub mod input;
pub mod pages;
pub mod render;

pub use input::handle_key_event;
pub use render::ui;
