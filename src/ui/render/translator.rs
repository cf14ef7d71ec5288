use super::Frame;
use crate::state::{Focus, Phase, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Render translator widget according to state.
///
pub fn translator(frame: &mut Frame, size: Rect, state: &State) {
    let translator = state.translator();
    let block = styling::widget_block(
        "오늘의 영어 문장".to_string(),
        state.focus() == Focus::Translator,
    );

    let mut lines = Vec::new();
    match translator.phase() {
        Phase::Idle => {
            lines.push(Line::from(Span::styled(
                "g 키를 눌러 새 문장을 생성하세요.",
                styling::muted_text_style(),
            )));
        }
        Phase::Loading => {
            lines.push(Line::from(format!("{} 생성 중...", spinner::frame(state))));
        }
        Phase::Error => {
            if let Some(message) = translator.error() {
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    styling::error_text_style(),
                )));
                lines.push(Line::from(""));
            }
        }
        Phase::Ready => {}
    }

    if !translator.is_loading() {
        if let Some(pair) = translator.current() {
            lines.push(Line::from(Span::styled(
                pair.english.clone(),
                styling::highlight_text_style(),
            )));
            lines.push(Line::from(Span::styled(
                pair.korean.clone(),
                styling::normal_text_style(),
            )));
            lines.push(Line::from(""));
            let speech = if translator.is_speaking() {
                Span::styled(
                    format!("{} 재생 중...", spinner::frame(state)),
                    styling::active_list_item_style(),
                )
            } else {
                Span::styled(
                    "s: 듣기",
                    styling::muted_text_style().add_modifier(Modifier::ITALIC),
                )
            };
            lines.push(Line::from(speech));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, size);
}
