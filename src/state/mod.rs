//! Application state management module.
//!
//! `State` holds one independent model per widget plus the bits of UI state
//! shared by the whole screen (focus, spinner, log buffer). Widgets never
//! read each other's state.

mod clock;
mod navigation;
mod todo;
mod translator;
mod weather;

pub use clock::{Clock, LABEL as CLOCK_LABEL};
pub use navigation::Focus;
pub use todo::{FilterMode, TodoItem, TodoList};
pub use translator::{Phase, Translator};
#[cfg(test)]
pub use translator::{SENTENCES, SPEECH_ERROR, TRANSLATION_ERROR};
pub use weather::{WeatherPanel, WeatherView, KEY_HINT as WEATHER_KEY_HINT};

use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;

/// Houses data representative of application state.
///
#[derive(Default)]
pub struct State {
    net_sender: Option<NetworkEventSender>,
    focus: Focus,
    spinner_index: usize,
    clock: Clock,
    todo: TodoList,
    translator: Translator,
    weather: WeatherPanel,
    logs: LogBuffer,
}

impl State {
    /// Return new instance sending network requests to the given channel.
    ///
    pub fn new(net_sender: NetworkEventSender, logs: LogBuffer) -> Self {
        State {
            net_sender: Some(net_sender),
            logs,
            ..State::default()
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn advance_spinner_index(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn todo(&self) -> &TodoList {
        &self.todo
    }

    pub fn todo_mut(&mut self) -> &mut TodoList {
        &mut self.todo
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    pub fn weather(&self) -> &WeatherPanel {
        &self.weather
    }

    pub fn weather_mut(&mut self) -> &mut WeatherPanel {
        &mut self.weather
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    /// Start generating a new sentence pair unless one is already loading.
    /// Returns whether a request was dispatched.
    ///
    pub fn generate_sentence(&mut self) -> bool {
        let Some(english) = self.translator.begin_generation(&mut rand::thread_rng()) else {
            return false;
        };
        if !self.dispatch(NetworkEvent::Translate {
            english: english.to_owned(),
        }) {
            self.translator
                .finish_generation(english, Err("network queue unavailable"));
            return false;
        }
        true
    }

    /// Start speaking the current English sentence unless already speaking.
    /// Returns whether a request was dispatched.
    ///
    pub fn speak_sentence(&mut self) -> bool {
        let Some(text) = self.translator.begin_speaking() else {
            return false;
        };
        if !self.dispatch(NetworkEvent::Speak { text }) {
            self.translator
                .finish_speaking(Err("network queue unavailable"));
            return false;
        }
        true
    }

    /// Ask for a weather fetch outside the regular schedule.
    ///
    pub fn refresh_weather(&mut self) -> bool {
        self.dispatch(NetworkEvent::FetchWeather)
    }

    fn dispatch(&self, event: NetworkEvent) -> bool {
        match &self.net_sender {
            Some(sender) => match sender.send(event) {
                Ok(()) => true,
                Err(e) => {
                    error!("Failed to queue network event: {}", e);
                    false
                }
            },
            None => {
                warn!("No network channel, dropping {:?}", event);
                false
            }
        }
    }
}
