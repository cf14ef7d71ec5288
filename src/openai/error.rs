//! Text and speech service error types.

/// Errors that can occur while requesting a translation or speech audio.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// Neither a key nor a credential-injecting proxy is configured
    #[error("OpenAI API key not configured")]
    MissingCredential,

    /// The service rejected the credential
    #[error("OpenAI API rejected the key (status 401)")]
    Unauthorized,

    /// The service answered with a non-success status
    #[error("OpenAI API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Response body did not carry the expected content
    #[error("Malformed OpenAI response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_error_display() {
        let error = OpenAiError::Status {
            status: 429,
            message: "rate limited".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("429"));
        assert!(error_str.contains("rate limited"));

        assert!(OpenAiError::MalformedResponse("no choices".to_string())
            .to_string()
            .contains("no choices"));
    }
}
