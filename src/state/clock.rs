use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const TIME_FORMAT: &str = "%H:%M:%S";

/// Shown before the first tick.
pub const PLACEHOLDER: &str = "00:00:00";

pub const LABEL: &str = "현재 시각";

const KST_OFFSET: &str = "+09:00";

/// Houses the formatted local time.
///
#[derive(Default)]
pub struct Clock {
    time: Option<String>,
    zone: Option<String>,
}

impl Clock {
    /// Store the given instant as the displayed time.
    ///
    pub fn tick<Tz: TimeZone>(&mut self, now: DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.time = Some(now.format(TIME_FORMAT).to_string());
        self.zone = Some(now.format("%:z").to_string());
    }

    pub fn display(&self) -> &str {
        self.time.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Return the caption naming the time zone of the displayed time. Korean
    /// standard time gets its name; any other offset is shown numerically.
    ///
    pub fn caption(&self) -> String {
        match self.zone.as_deref() {
            None | Some(KST_OFFSET) => "한국 표준시 (KST)".to_string(),
            Some(zone) => format!("현지 시각 (UTC{})", zone),
        }
    }
}
