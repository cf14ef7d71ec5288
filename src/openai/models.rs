use serde::{Deserialize, Serialize};

/// Body of a chat completion request.
///
#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Body of a chat completion response, reduced to what is read.
///
#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ReplyMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Return the trimmed text of the first choice, if it has any.
    ///
    pub fn first_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
    }
}

/// Body of a speech synthesis request.
///
#[derive(Serialize)]
pub(crate) struct SpeechRequest<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub input: &'a str,
}
