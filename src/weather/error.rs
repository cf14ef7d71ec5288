//! Weather service error types.

/// Errors that can occur while fetching current weather.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// No credential configured for the weather service
    #[error("Weather API key not configured")]
    MissingCredential,

    /// The service rejected the credential
    #[error("Weather API rejected the key (status 401)")]
    Unauthorized,

    /// The service answered with a non-success status
    #[error("Weather API request failed with status {0}")]
    Status(u16),

    /// HTTP request failed. The request URL is stripped because the
    /// credential travels in its query string.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(error: reqwest::Error) -> Self {
        WeatherError::HttpRequest(error.without_url())
    }
}

impl WeatherError {
    /// Return the message shown to the user in the weather panel.
    ///
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MissingCredential => "API 키가 설정되지 않았습니다.".to_string(),
            WeatherError::Unauthorized => {
                "API 키가 유효하지 않거나 아직 활성화되지 않았습니다. (활성화까지 최대 2시간 소요)"
                    .to_string()
            }
            WeatherError::Status(code) => format!(
                "날씨 정보를 가져오는데 실패했습니다. (상태 코드: {})",
                code
            ),
            WeatherError::HttpRequest(_) => "날씨 서버에 연결할 수 없습니다.".to_string(),
            WeatherError::MalformedResponse(_) => {
                "날씨 정보 응답을 해석할 수 없습니다.".to_string()
            }
        }
    }
}
