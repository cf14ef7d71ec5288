use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Return the border style for active blocks.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn muted_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn error_text_style() -> Style {
    Style::default().fg(Color::LightRed)
}

pub fn highlight_text_style() -> Style {
    Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::BOLD)
}

/// Return a bordered block whose border and title follow focus.
///
pub fn widget_block(title: String, active: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if active {
        block
            .border_style(active_block_border_style())
            .title(Span::styled(title, active_block_title_style()))
    } else {
        block.border_style(normal_block_border_style()).title(title)
    }
}
