use super::Frame;
use crate::state::{FilterMode, Focus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

/// Render to-do widget according to state.
///
pub fn todo(frame: &mut Frame, size: Rect, state: &State) {
    let todo = state.todo();
    let done = todo.items().iter().filter(|item| item.completed).count();
    let title = format!("할 일 ({}/{})", done, todo.items().len());
    let active = state.focus() == Focus::Todo;
    let block = styling::widget_block(title, active);
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let input_style = if todo.is_input_mode() {
        styling::active_block_border_style()
    } else {
        styling::normal_block_border_style()
    };
    let input_text = if todo.is_input_mode() {
        format!("{}▏", todo.input())
    } else if todo.input().is_empty() {
        "새 할 일을 입력하려면 a".to_string()
    } else {
        todo.input().to_string()
    };
    let input = Paragraph::new(input_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(input_style),
    );
    frame.render_widget(input, rows[0]);

    let selected_filter = FilterMode::ALL
        .iter()
        .position(|mode| *mode == todo.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(FilterMode::ALL.iter().map(|mode| mode.label()).collect::<Vec<_>>())
        .select(selected_filter)
        .style(styling::muted_text_style())
        .highlight_style(styling::active_list_item_style());
    frame.render_widget(tabs, rows[1]);

    let visible = todo.visible();
    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "할 일이 없습니다.",
            styling::muted_text_style(),
        ));
        frame.render_widget(empty, rows[2]);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let (mark, style) = if item.completed {
                (
                    "[x] ",
                    styling::muted_text_style().add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", styling::normal_text_style())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(item.text.clone(), style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if active {
        list_state.select(Some(todo.selected_index()));
    }
    let list = List::new(items)
        .highlight_style(styling::active_list_item_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, rows[2], &mut list_state);
}
