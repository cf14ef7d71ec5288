//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library:
//! - Screen layout
//! - One render function per widget plus the log panel and footer
//! - Reusable pieces (spinner, styling)

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
