use crate::state::{Focus, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 100;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx }
    }

    /// Block until the next terminal event arrives.
    ///
    pub fn next(&self) -> Result<Event<KeyEvent>> {
        Ok(self.rx.recv()?)
    }
}

/// Apply a terminal event to state. Returns false if exit was requested.
///
pub fn handle(event: Event<KeyEvent>, state: &mut State) -> bool {
    match event {
        Event::Tick => {
            state.advance_spinner_index();
            true
        }
        Event::Input(key) => handle_key(key, state),
    }
}

fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    // Text entry swallows every other key until it is left.
    if state.focus() == Focus::Todo && state.todo().is_input_mode() {
        let todo = state.todo_mut();
        match key.code {
            KeyCode::Enter => {
                todo.submit_input();
            }
            KeyCode::Esc => todo.leave_input_mode(),
            KeyCode::Backspace => todo.pop_input(),
            KeyCode::Char(c) => todo.push_input(c),
            _ => (),
        }
        return true;
    }

    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Tab => state.focus_next(),
        KeyCode::BackTab => state.focus_previous(),
        _ => match state.focus() {
            Focus::Todo => handle_todo_key(key.code, state),
            Focus::Translator => handle_translator_key(key.code, state),
            Focus::Weather => handle_weather_key(key.code, state),
        },
    }
    true
}

fn handle_todo_key(code: KeyCode, state: &mut State) {
    let todo = state.todo_mut();
    match code {
        KeyCode::Char('a') | KeyCode::Char('i') => todo.enter_input_mode(),
        KeyCode::Char('j') | KeyCode::Down => todo.select_next(),
        KeyCode::Char('k') | KeyCode::Up => todo.select_previous(),
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
            todo.toggle_selected();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            todo.delete_selected();
        }
        KeyCode::Char('f') => todo.cycle_filter(),
        _ => (),
    }
}

fn handle_translator_key(code: KeyCode, state: &mut State) {
    match code {
        KeyCode::Char('g') | KeyCode::Enter => {
            state.generate_sentence();
        }
        KeyCode::Char('s') => {
            state.speak_sentence();
        }
        _ => (),
    }
}

fn handle_weather_key(code: KeyCode, state: &mut State) {
    if let KeyCode::Char('r') = code {
        state.refresh_weather();
    }
}
