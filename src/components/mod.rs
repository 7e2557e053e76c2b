//! Terminal front end pieces.
//!
//! - [`palette`] - Colors for each [`Theme`](foliosh_core::models::Theme)
//! - [`screen`] - Incremental scrollback renderer
//! - [`input`] - Line editor helper wiring Tab and history keys to the session
//! - [`subprogram`] - Pac-Man screen, file viewer and post editor

pub mod input;
pub mod palette;
pub mod screen;
pub mod subprogram;

pub use input::{InputHelper, SharedTerminal, lock};
pub use palette::Palette;
pub use screen::Screen;
