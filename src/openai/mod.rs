//! Text and speech service.
//!
//! Speaks the OpenAI-compatible chat completion and speech endpoints. The
//! base URL may point at a proxy that injects the credential, in which case
//! no key needs to be configured locally.

mod error;
mod models;

pub use error::OpenAiError;

use async_trait::async_trait;
use log::*;
use models::{ChatMessage, ChatRequest, ChatResponse, SpeechRequest};
use reqwest::{Response, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT_IN_SECS: u64 = 60;
const CHAT_MODEL: &str = "gpt-4";
const CHAT_TEMPERATURE: f32 = 0.7;
const SPEECH_MODEL: &str = "tts-1-hd";
const SPEECH_VOICE: &str = "nova";

const TRANSLATION_INSTRUCTION: &str = "Provide a bilingual sentence in English and Korean for language study.

Steps:
1. Upon receiving a request, identify or generate a simple sentence.
2. Translate the sentence into Korean if the language provided is English or into English if the language provided is Korean.
3. Provide both sentences alongside each other for comparison and study.

Notes:
- Ensure translations maintain the meaning of the original sentence as closely as possible.
- Use simple and clear sentences suitable for language learners.
- Respond with ONLY the Korean translation, no additional text or formatting.";

/// Anything able to translate a study sentence.
///
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, sentence: &str) -> Result<String, OpenAiError>;
}

/// Anything able to turn text into playable audio bytes.
///
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, OpenAiError>;
}

/// Makes chat completion and speech requests.
///
pub struct OpenAi {
    api_key: Option<String>,
    base_url: String,
    http_client: reqwest::Client,
}

impl OpenAi {
    /// Returns a new instance for the given credential and base URL.
    ///
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<OpenAi, OpenAiError> {
        debug!("Initializing text and speech client at {}...", base_url);
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_IN_SECS))
            .build()?;
        Ok(OpenAi {
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    /// Post a JSON body and return the response if its status is a success.
    ///
    async fn post<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<Response, OpenAiError> {
        if self.api_key.is_none() && self.base_url == DEFAULT_BASE_URL {
            return Err(OpenAiError::MissingCredential);
        }

        let mut request = self
            .http_client
            .post(format!("{}/{}", self.base_url, path))
            .json(body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(OpenAiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            return Err(OpenAiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TranslationService for OpenAi {
    async fn translate(&self, sentence: &str) -> Result<String, OpenAiError> {
        debug!("Requesting translation for '{}'...", sentence);
        let body = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: TRANSLATION_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: sentence,
                },
            ],
            temperature: CHAT_TEMPERATURE,
        };

        let bytes = self.post("chat/completions", &body).await?.bytes().await?;
        let response: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| OpenAiError::MalformedResponse(e.to_string()))?;
        response
            .first_text()
            .ok_or_else(|| OpenAiError::MalformedResponse("no translated text".to_string()))
    }
}

#[async_trait]
impl SpeechService for OpenAi {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, OpenAiError> {
        debug!("Requesting speech for '{}'...", text);
        let body = SpeechRequest {
            model: SPEECH_MODEL,
            voice: SPEECH_VOICE,
            input: text,
        };

        let audio = self.post("audio/speech", &body).await?.bytes().await?;
        if audio.is_empty() {
            return Err(OpenAiError::MalformedResponse("empty audio".to_string()));
        }
        debug!("Received {} bytes of speech audio", audio.len());
        Ok(audio.to_vec())
    }
}
