use crate::weather::{WeatherError, WeatherSnapshot};
use chrono::{DateTime, Local};
use log::*;

const DEFAULT_LOCATION: &str = "Seoul";

/// Shown under every weather error.
pub const KEY_HINT: &str = "OpenWeatherMap API 키를 확인해주세요.";

/// Specifying what the weather panel renders.
///
#[derive(Debug, PartialEq)]
pub enum WeatherView<'a> {
    Error(&'a str),
    Loading,
    Ready(&'a WeatherSnapshot),
}

/// Houses the latest snapshot and fetch status.
///
pub struct WeatherPanel {
    location: String,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
    loading: bool,
    last_updated: Option<DateTime<Local>>,
}

impl Default for WeatherPanel {
    fn default() -> Self {
        WeatherPanel {
            location: DEFAULT_LOCATION.to_string(),
            snapshot: None,
            error: None,
            loading: true,
            last_updated: None,
        }
    }
}

impl WeatherPanel {
    pub fn set_location(&mut self, location: &str) {
        self.location = location.trim().to_owned();
    }

    /// Return the panel title naming the configured location, with Seoul
    /// given its Korean name.
    ///
    pub fn title(&self) -> String {
        if self.location.eq_ignore_ascii_case(DEFAULT_LOCATION) {
            "서울 날씨".to_string()
        } else {
            format!("{} 날씨", self.location)
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Store the outcome of a fetch and leave Loading. A success replaces the
    /// snapshot and clears any error; a failure keeps the old snapshot but
    /// the error is what gets rendered.
    ///
    pub fn finish_fetch(&mut self, result: Result<WeatherSnapshot, WeatherError>, now: DateTime<Local>) {
        match result {
            Ok(snapshot) => {
                info!(
                    "Weather updated: {} {}",
                    snapshot.description,
                    snapshot.temperature_label()
                );
                self.snapshot = Some(snapshot);
                self.error = None;
                self.last_updated = Some(now);
            }
            Err(e) => {
                error!("Weather fetch failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }

    pub fn view(&self) -> WeatherView<'_> {
        if let Some(error) = &self.error {
            return WeatherView::Error(error);
        }
        match &self.snapshot {
            Some(snapshot) if !self.loading => WeatherView::Ready(snapshot),
            _ => WeatherView::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_updated(&self) -> Option<&DateTime<Local>> {
        self.last_updated.as_ref()
    }
}
