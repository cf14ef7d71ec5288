use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let visible = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .logs()
        .tail(visible)
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry,
                styling::normal_text_style(),
            )]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style())
        .block(
            Block::default()
                .title("Log")
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style()),
        );
    frame.render_widget(list, size);
}
