use crate::state::State;
use ratatui::{
    layout::Alignment,
    text::Line,
    widgets::Paragraph,
};

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the current spinner frame.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.spinner_index() % FRAMES.len()]
}

/// Return a loading paragraph vertically centred in the given height.
///
pub fn widget(state: &State, height: u16, label: &str) -> Paragraph<'static> {
    let padding = (height.saturating_sub(3) / 2) as usize;
    let mut lines = vec![Line::from(""); padding];
    lines.push(Line::from(format!("{} {}", frame(state), label)));
    Paragraph::new(lines).alignment(Alignment::Center)
}
