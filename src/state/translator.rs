//! Sentence translator widget state.
//!
//! Generation runs `Idle → Loading → {Ready, Error}` and speech runs
//! `SpeechIdle → Speaking → SpeechIdle`. Both flags are checked and set while
//! the state lock is held, so a second trigger during a request is rejected.
//! Speaking lasts until playback has finished or failed.

use log::*;
use rand::{seq::SliceRandom, Rng};
use std::fmt::Display;

pub const SENTENCES: [&str; 10] = [
    "What's your favorite food?",
    "I enjoy watching movies.",
    "Where are you going?",
    "The book is on the table.",
    "I need to study harder.",
    "Can you help me?",
    "This coffee tastes good.",
    "I like traveling.",
    "What time is it now?",
    "See you tomorrow!",
];

pub const TRANSLATION_ERROR: &str = "번역 중 오류가 발생했습니다. 다시 시도해주세요.";
pub const SPEECH_ERROR: &str = "음성 변환 중 오류가 발생했습니다.";

/// Defines a sentence pair shown for study.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    pub english: String,
    pub korean: String,
}

/// Specifying the generation phases.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Houses the current sentence pair and request flags.
///
#[derive(Default)]
pub struct Translator {
    current: Option<TranslationResult>,
    loading: bool,
    speaking: bool,
    error: Option<String>,
}

impl Translator {
    /// Enter Loading and pick the sentence to translate, or return `None` if a
    /// generation is already in flight.
    ///
    pub fn begin_generation<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'static str> {
        if self.loading {
            debug!("Ignoring generate request while loading");
            return None;
        }
        self.loading = true;
        self.error = None;
        SENTENCES.choose(rng).copied()
    }

    /// Store the outcome of a generation and leave Loading.
    ///
    pub fn finish_generation<E: Display>(&mut self, english: &str, result: Result<String, E>) {
        match result {
            Ok(korean) => {
                self.current = Some(TranslationResult {
                    english: english.to_owned(),
                    korean,
                });
                self.error = None;
            }
            Err(e) => {
                error!("Translation error: {}", e);
                self.error = Some(TRANSLATION_ERROR.to_string());
            }
        }
        self.loading = false;
    }

    /// Enter Speaking and return the English sentence, or `None` if playback
    /// is already in flight or nothing has been generated yet.
    ///
    pub fn begin_speaking(&mut self) -> Option<String> {
        if self.speaking {
            debug!("Ignoring speak request while speaking");
            return None;
        }
        let english = self.current.as_ref()?.english.to_owned();
        self.speaking = true;
        Some(english)
    }

    /// Leave Speaking, recording a failure if there was one.
    ///
    pub fn finish_speaking<E: Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            error!("Speech error: {}", e);
            self.error = Some(SPEECH_ERROR.to_string());
        }
        self.speaking = false;
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.current.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub fn current(&self) -> Option<&TranslationResult> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }
}
