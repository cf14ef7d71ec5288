//! Current weather service.
//!
//! `OpenWeather` talks to an OpenWeatherMap-compatible endpoint. The network
//! handler only sees the `WeatherService` trait so tests can substitute a
//! fake.

mod error;
mod resource;

pub use error::WeatherError;
pub use resource::*;

use async_trait::async_trait;
use log::*;
use reqwest::StatusCode;
use std::time::Duration;

const REQUEST_TIMEOUT_IN_SECS: u64 = 15;

/// Anything able to produce a fresh weather snapshot.
///
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn fetch(&self) -> Result<WeatherSnapshot, WeatherError>;
}

/// Fixed query sent on every weather request.
///
#[derive(Clone, Debug)]
pub struct WeatherQuery {
    pub location: String,
    pub units: String,
    pub language: String,
}

/// Responsible for requesting current weather and converting the response
/// into a `WeatherSnapshot`.
///
pub struct OpenWeather {
    api_key: Option<String>,
    base_url: String,
    query: WeatherQuery,
    http_client: reqwest::Client,
}

impl OpenWeather {
    /// Returns a new instance for the given credential, base URL and query.
    ///
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        query: WeatherQuery,
    ) -> Result<OpenWeather, WeatherError> {
        debug!(
            "Initializing weather client for '{}' at {}...",
            query.location, base_url
        );
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_IN_SECS))
            .build()?;
        Ok(OpenWeather {
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            query,
            http_client,
        })
    }
}

#[async_trait]
impl WeatherService for OpenWeather {
    async fn fetch(&self) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingCredential)?;

        debug!("Requesting current weather for '{}'...", self.query.location);
        let response = self
            .http_client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", self.query.location.as_str()),
                ("units", self.query.units.as_str()),
                ("appid", api_key),
                ("lang", self.query.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::Unauthorized);
        }
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: WeatherResponse = serde_json::from_slice(&bytes)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;
        let snapshot = WeatherSnapshot::try_from(body)?;
        debug!(
            "Received weather for '{}': {} {:.1}",
            snapshot.location, snapshot.description, snapshot.temperature
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    fn query() -> WeatherQuery {
        WeatherQuery {
            location: "Seoul".to_string(),
            units: "metric".to_string(),
            language: "kr".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_success() -> Result<(), WeatherError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/data/2.5/weather")
                    .query_param("q", "Seoul")
                    .query_param("units", "metric")
                    .query_param("appid", "secret")
                    .query_param("lang", "kr");
                then.status(200).json_body(json!({
                    "name": "Seoul",
                    "weather": [{ "description": "맑음", "icon": "01d" }],
                    "main": {
                        "temp": 21.6,
                        "feels_like": 20.4,
                        "temp_min": 18.2,
                        "temp_max": 24.5
                    }
                }));
            })
            .await;

        let weather = OpenWeather::new(Some("secret".to_string()), &server.base_url(), query())?;
        let snapshot = weather.fetch().await?;
        mock.assert_async().await;

        assert_eq!(snapshot.location, "Seoul");
        assert_eq!(snapshot.description, "맑음");
        assert_eq!(snapshot.icon_id, "01d");
        assert_eq!(snapshot.temperature_label(), "22°C");
        assert_eq!(snapshot.feels_like_label(), "20°C");
        assert_eq!(snapshot.range_label(), "18°C / 25°C");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/data/2.5/weather");
                then.status(401);
            })
            .await;

        let weather = OpenWeather::new(Some("fresh".to_string()), &server.base_url(), query()).unwrap();
        let error = weather.fetch().await.unwrap_err();
        mock.assert_async().await;

        assert!(matches!(error, WeatherError::Unauthorized));
        assert!(error.user_message().contains("아직 활성화되지 않았습니다"));
    }

    #[tokio::test]
    async fn fetch_server_error() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/data/2.5/weather");
                then.status(500);
            })
            .await;

        let weather = OpenWeather::new(Some("key".to_string()), &server.base_url(), query()).unwrap();
        let error = weather.fetch().await.unwrap_err();
        mock.assert_async().await;

        assert!(matches!(error, WeatherError::Status(500)));
        assert!(error.user_message().contains("500"));
    }

    #[tokio::test]
    async fn fetch_malformed_body() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/data/2.5/weather");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let weather = OpenWeather::new(Some("key".to_string()), &server.base_url(), query()).unwrap();
        let error = weather.fetch().await.unwrap_err();
        mock.assert_async().await;

        assert!(matches!(error, WeatherError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn fetch_connection_error_hides_key() {
        let weather = OpenWeather::new(
            Some("SECRETKEY123".to_string()),
            "http://127.0.0.1:1",
            query(),
        )
        .unwrap();
        let error = weather.fetch().await.unwrap_err();

        assert!(matches!(error, WeatherError::HttpRequest(_)));
        assert!(!error.to_string().contains("SECRETKEY123"));
        assert!(!format!("{:?}", error).contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn fetch_without_key_sends_nothing() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/data/2.5/weather");
                then.status(200);
            })
            .await;

        let weather = OpenWeather::new(None, &server.base_url(), query()).unwrap();
        let error = weather.fetch().await.unwrap_err();

        assert!(matches!(error, WeatherError::MissingCredential));
        mock.assert_hits_async(0).await;
    }
}
