use super::Frame;
use crate::state::{Focus, State, WeatherView, WEATHER_KEY_HINT};
use crate::ui::widgets::{spinner, styling};
use crate::weather::WeatherSnapshot;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Render weather widget according to state.
///
pub fn weather(frame: &mut Frame, size: Rect, state: &State) {
    let active = state.focus() == Focus::Weather;
    match state.weather().view() {
        WeatherView::Error(message) => {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(message.to_string(), styling::error_text_style())),
                Line::from(""),
                Line::from(Span::styled(WEATHER_KEY_HINT, styling::normal_text_style())),
                Line::from(Span::styled("r: 다시 시도", styling::muted_text_style())),
            ])
            .wrap(Wrap { trim: true })
            .block(styling::widget_block("날씨 정보 오류".to_string(), active));
            frame.render_widget(paragraph, size);
        }
        WeatherView::Loading => {
            let block = styling::widget_block(state.weather().title(), active);
            let inner = block.inner(size);
            frame.render_widget(block, size);
            frame.render_widget(
                spinner::widget(state, inner.height, "날씨 정보를 불러오는 중..."),
                inner,
            );
        }
        WeatherView::Ready(snapshot) => {
            let mut lines = ready_lines(snapshot);
            if let Some(updated) = state.weather().last_updated() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("업데이트: {}", updated.format("%H:%M")),
                    styling::muted_text_style(),
                )));
            }
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(styling::widget_block(state.weather().title(), active));
            frame.render_widget(paragraph, size);
        }
    }
}

fn ready_lines(snapshot: &WeatherSnapshot) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw(format!("{} ", snapshot.icon_glyph())),
            Span::styled(
                snapshot.temperature_label(),
                styling::highlight_text_style().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            snapshot.description.clone(),
            styling::normal_text_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("체감온도 ", styling::muted_text_style()),
            Span::styled(snapshot.feels_like_label(), styling::normal_text_style()),
        ]),
        Line::from(vec![
            Span::styled("최저/최고 ", styling::muted_text_style()),
            Span::styled(snapshot.range_label(), styling::normal_text_style()),
        ]),
    ]
}
