use super::WeatherError;
use fake::Dummy;
use serde::Deserialize;

/// Defines the most recent weather reading for the configured location.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub description: String,
    pub icon_id: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
}

impl WeatherSnapshot {
    /// Return the current temperature rounded for display.
    ///
    pub fn temperature_label(&self) -> String {
        degrees(self.temperature)
    }

    /// Return the apparent temperature rounded for display.
    ///
    pub fn feels_like_label(&self) -> String {
        degrees(self.feels_like)
    }

    /// Return the daily range rounded for display.
    ///
    pub fn range_label(&self) -> String {
        format!("{} / {}", degrees(self.min), degrees(self.max))
    }

    /// Return a terminal glyph for the service's icon id ("01d", "10n", ...).
    ///
    pub fn icon_glyph(&self) -> &'static str {
        match self.icon_id.get(..2) {
            Some("01") => "☀",
            Some("02") => "⛅",
            Some("03") | Some("04") => "☁",
            Some("09") | Some("10") => "☂",
            Some("11") => "⚡",
            Some("13") => "❄",
            Some("50") => "≋",
            _ => "?",
        }
    }
}

/// Round to the nearest whole degree.
///
pub fn round_degrees(value: f64) -> i64 {
    value.round() as i64
}

fn degrees(value: f64) -> String {
    format!("{}°C", round_degrees(value))
}

/// Response body of the current weather endpoint.
///
#[derive(Deserialize)]
pub(crate) struct WeatherResponse {
    #[serde(default)]
    name: String,
    weather: Vec<ConditionModel>,
    main: MainModel,
}

#[derive(Deserialize)]
struct ConditionModel {
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct MainModel {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
}

impl TryFrom<WeatherResponse> for WeatherSnapshot {
    type Error = WeatherError;

    fn try_from(response: WeatherResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::MalformedResponse("empty weather list".to_string()))?;
        Ok(WeatherSnapshot {
            location: response.name,
            description: condition.description,
            icon_id: condition.icon,
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            min: response.main.temp_min,
            max: response.main.temp_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn labels_round_to_nearest_degree() {
        let snapshot = WeatherSnapshot {
            temperature: 21.6,
            feels_like: -3.2,
            min: 17.49,
            max: 24.5,
            ..Faker.fake()
        };
        assert_eq!(snapshot.temperature_label(), "22°C");
        assert_eq!(snapshot.feels_like_label(), "-3°C");
        assert_eq!(snapshot.range_label(), "17°C / 25°C");
    }

    #[test]
    fn icon_glyph_by_prefix() {
        let mut snapshot: WeatherSnapshot = Faker.fake();
        snapshot.icon_id = "10n".to_string();
        assert_eq!(snapshot.icon_glyph(), "☂");
        snapshot.icon_id = "x".to_string();
        assert_eq!(snapshot.icon_glyph(), "?");
    }

    #[test]
    fn empty_condition_list_is_malformed() {
        let response: WeatherResponse = serde_json::from_str(
            r#"{"name":"Seoul","weather":[],"main":{"temp":1,"feels_like":1,"temp_min":1,"temp_max":1}}"#,
        )
        .unwrap();
        let result = WeatherSnapshot::try_from(response);
        assert!(matches!(result, Err(WeatherError::MalformedResponse(_))));
    }
}
