use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the focused widget.
///
fn hints(state: &State) -> &'static str {
    match state.focus() {
        Focus::Todo if state.todo().is_input_mode() => {
            " Enter: add  Esc: cancel  Backspace: delete"
        }
        Focus::Todo => " a: add  j/k: move  space: toggle  d: delete  f: filter",
        Focus::Translator => " g: new sentence  s: speak",
        Focus::Weather => " r: refresh",
    }
}

/// Render footer widget according to state.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let line = Line::from(vec![
        Span::styled(hints(state), styling::normal_text_style()),
        Span::styled("  Tab: next widget  q: quit", styling::muted_text_style()),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}
