use super::{clock, footer, log, todo, translator, weather, Frame};
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

const LOG_HEIGHT: u16 = 8;
const FOOTER_HEIGHT: u16 = 1;
const CLOCK_HEIGHT: u16 = 5;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CLOCK_HEIGHT), Constraint::Min(5)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    clock(frame, left[0], state);
    weather(frame, left[1], state);
    todo(frame, right[0], state);
    translator(frame, right[1], state);
    log(frame, rows[1], state);
    footer(frame, rows[2], state);
}
