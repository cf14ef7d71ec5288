use super::Frame;
use crate::state::{State, CLOCK_LABEL};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render clock widget according to state.
///
pub fn clock(frame: &mut Frame, size: Rect, state: &State) {
    let clock = state.clock();
    let lines = vec![
        Line::from(Span::styled(
            clock.display().to_string(),
            styling::highlight_text_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(clock.caption(), styling::muted_text_style())),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(styling::widget_block(CLOCK_LABEL.to_string(), false));
    frame.render_widget(paragraph, size);
}
