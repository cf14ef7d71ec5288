use crate::audio::AudioPlayer;
use crate::openai::{SpeechService, TranslationService};
use crate::state::State;
use crate::weather::WeatherService;
use anyhow::Result;
use chrono::Local;
use log::*;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    FetchWeather,
    Translate { english: String },
    Speak { text: String },
}

/// Remote service handles used by the widgets.
///
pub struct Services {
    pub weather: Box<dyn WeatherService>,
    pub translation: Box<dyn TranslationService>,
    pub speech: Box<dyn SpeechService>,
    pub player: Arc<dyn AudioPlayer>,
}

/// Specify struct for managing state with network events.
///
/// The state lock is never held across a service call: each handler reads
/// what it needs, releases the lock, awaits the service, then locks again to
/// store the outcome.
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    services: &'a Services,
    playback: Option<JoinHandle<()>>,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state and services.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, services: &'a Services) -> Self {
        Handler {
            state,
            services,
            playback: None,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::FetchWeather => self.fetch_weather().await,
            Event::Translate { english } => self.translate(english).await,
            Event::Speak { text } => self.speak(text).await,
        }
        Ok(())
    }

    /// Wait for the playback started by the last speak request, if any.
    ///
    #[cfg(test)]
    pub async fn finish_playback(&mut self) {
        if let Some(handle) = self.playback.take() {
            if let Err(e) = handle.await {
                error!("Playback task ended abnormally: {}", e);
            }
        }
    }

    /// Update state with a fresh weather snapshot or the failure message.
    ///
    async fn fetch_weather(&mut self) {
        info!("Fetching current weather...");
        self.state.lock().await.weather_mut().begin_fetch();
        let result = self.services.weather.fetch().await;
        self.state
            .lock()
            .await
            .weather_mut()
            .finish_fetch(result, Local::now());
    }

    /// Update state with the translation of the chosen sentence.
    ///
    async fn translate(&mut self, english: String) {
        info!("Translating '{}'...", english);
        let result = self.services.translation.translate(&english).await;
        self.state
            .lock()
            .await
            .translator_mut()
            .finish_generation(&english, result);
    }

    /// Request speech audio and start playing it. Speaking ends when the
    /// player finishes, which happens off the network queue.
    ///
    async fn speak(&mut self, text: String) {
        info!("Synthesizing speech...");
        let audio = match self.services.speech.synthesize(&text).await {
            Ok(audio) => audio,
            Err(e) => {
                self.state.lock().await.translator_mut().finish_speaking(Err(e));
                return;
            }
        };

        let player = Arc::clone(&self.services.player);
        let state = Arc::clone(self.state);
        self.playback = Some(tokio::spawn(async move {
            let result = player.play(audio).await;
            state.lock().await.translator_mut().finish_speaking(result);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioError;
    use crate::logger::LogBuffer;
    use crate::openai::OpenAiError;
    use crate::state::{Phase, WeatherView, SPEECH_ERROR, TRANSLATION_ERROR};
    use crate::weather::{WeatherError, WeatherSnapshot};
    use async_trait::async_trait;
    use fake::{Fake, Faker};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    };

    enum WeatherReply {
        Snapshot(WeatherSnapshot),
        Unauthorized,
        Status(u16),
    }

    struct FakeWeather(WeatherReply);

    #[async_trait]
    impl WeatherService for FakeWeather {
        async fn fetch(&self) -> Result<WeatherSnapshot, WeatherError> {
            match &self.0 {
                WeatherReply::Snapshot(snapshot) => Ok(snapshot.clone()),
                WeatherReply::Unauthorized => Err(WeatherError::Unauthorized),
                WeatherReply::Status(code) => Err(WeatherError::Status(*code)),
            }
        }
    }

    struct FakeOpenAi {
        fail: bool,
    }

    #[async_trait]
    impl TranslationService for FakeOpenAi {
        async fn translate(&self, sentence: &str) -> Result<String, OpenAiError> {
            if self.fail {
                return Err(OpenAiError::MalformedResponse("no choices".to_string()));
            }
            Ok(format!("[ko] {}", sentence))
        }
    }

    #[async_trait]
    impl SpeechService for FakeOpenAi {
        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, OpenAiError> {
            if self.fail {
                return Err(OpenAiError::Unauthorized);
            }
            Ok(vec![0xff, 0xf3])
        }
    }

    #[derive(Default)]
    struct FakePlayer {
        plays: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AudioPlayer for FakePlayer {
        async fn play(&self, _audio: Vec<u8>) -> Result<(), AudioError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AudioError::NoCommand);
            }
            Ok(())
        }
    }

    fn services(weather: WeatherReply, fail: bool, player: Arc<FakePlayer>) -> Services {
        Services {
            weather: Box::new(FakeWeather(weather)),
            translation: Box::new(FakeOpenAi { fail }),
            speech: Box::new(FakeOpenAi { fail }),
            player,
        }
    }

    fn shared_state() -> (Arc<Mutex<State>>, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Mutex::new(State::new(tx, LogBuffer::default()))), rx)
    }

    /// Trigger generation the way the UI does and run the queued event.
    async fn generate(state: &Arc<Mutex<State>>, rx: &mpsc::Receiver<Event>, handler: &mut Handler<'_>) {
        assert!(state.lock().await.generate_sentence());
        let event = rx.try_recv().unwrap();
        handler.handle(event).await.unwrap();
    }

    #[tokio::test]
    async fn translate_success_populates_pair() {
        let (state, rx) = shared_state();
        let services = services(WeatherReply::Status(500), false, Arc::default());
        let mut handler = Handler::new(&state, &services);

        generate(&state, &rx, &mut handler).await;

        let state = state.lock().await;
        let translator = state.translator();
        assert!(!translator.is_loading());
        assert_eq!(translator.phase(), Phase::Ready);
        let pair = translator.current().unwrap();
        assert_eq!(pair.korean, format!("[ko] {}", pair.english));
        assert!(translator.error().is_none());
    }

    #[tokio::test]
    async fn translate_failure_sets_error() {
        let (state, rx) = shared_state();
        let services = services(WeatherReply::Status(500), true, Arc::default());
        let mut handler = Handler::new(&state, &services);

        generate(&state, &rx, &mut handler).await;

        let state = state.lock().await;
        let translator = state.translator();
        assert!(!translator.is_loading());
        assert_eq!(translator.phase(), Phase::Error);
        assert_eq!(translator.error(), Some(TRANSLATION_ERROR));
        assert!(translator.current().is_none());
    }

    #[tokio::test]
    async fn speak_plays_once_and_resets_after_playback() {
        let (state, rx) = shared_state();
        let player = Arc::new(FakePlayer::default());
        let services = services(WeatherReply::Status(500), false, Arc::clone(&player));
        let mut handler = Handler::new(&state, &services);
        generate(&state, &rx, &mut handler).await;

        assert!(state.lock().await.speak_sentence());
        assert!(!state.lock().await.speak_sentence());
        let event = rx.try_recv().unwrap();
        handler.handle(event).await.unwrap();
        handler.finish_playback().await;

        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
        let state = state.lock().await;
        assert!(!state.translator().is_speaking());
        assert!(state.translator().error().is_none());
    }

    #[tokio::test]
    async fn speak_player_failure_sets_error() {
        let (state, rx) = shared_state();
        let player = Arc::new(FakePlayer {
            fail: true,
            ..FakePlayer::default()
        });
        let services = services(WeatherReply::Status(500), false, player);
        let mut handler = Handler::new(&state, &services);
        generate(&state, &rx, &mut handler).await;

        state.lock().await.speak_sentence();
        let event = rx.try_recv().unwrap();
        handler.handle(event).await.unwrap();
        handler.finish_playback().await;

        let state = state.lock().await;
        assert!(!state.translator().is_speaking());
        assert_eq!(state.translator().error(), Some(SPEECH_ERROR));
    }

    #[tokio::test]
    async fn speak_request_failure_skips_player() {
        let (state, _rx) = shared_state();
        let player = Arc::new(FakePlayer::default());
        let services = services(WeatherReply::Status(500), true, Arc::clone(&player));
        let mut handler = Handler::new(&state, &services);

        handler
            .handle(Event::Speak {
                text: "Can you help me?".to_string(),
            })
            .await
            .unwrap();
        handler.finish_playback().await;

        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
        assert_eq!(state.lock().await.translator().error(), Some(SPEECH_ERROR));
    }

    #[tokio::test]
    async fn weather_unauthorized_message() {
        let (state, _rx) = shared_state();
        let services = services(WeatherReply::Unauthorized, false, Arc::default());
        let mut handler = Handler::new(&state, &services);

        handler.handle(Event::FetchWeather).await.unwrap();

        let state = state.lock().await;
        assert!(!state.weather().is_loading());
        match state.weather().view() {
            WeatherView::Error(message) => assert!(message.contains("아직 활성화되지 않았습니다")),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn weather_status_message_embeds_code() {
        let (state, _rx) = shared_state();
        let services = services(WeatherReply::Status(500), false, Arc::default());
        let mut handler = Handler::new(&state, &services);

        handler.handle(Event::FetchWeather).await.unwrap();

        let state = state.lock().await;
        match state.weather().view() {
            WeatherView::Error(message) => assert!(message.contains("500")),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn weather_success_is_ready_and_rounded() {
        let (state, _rx) = shared_state();
        let snapshot = WeatherSnapshot {
            temperature: 3.5,
            feels_like: -0.4,
            min: 1.2,
            max: 7.7,
            ..Faker.fake()
        };
        let services = services(WeatherReply::Snapshot(snapshot.clone()), false, Arc::default());
        let mut handler = Handler::new(&state, &services);

        handler.handle(Event::FetchWeather).await.unwrap();

        let state = state.lock().await;
        match state.weather().view() {
            WeatherView::Ready(ready) => {
                assert_eq!(ready, &snapshot);
                assert_eq!(ready.temperature_label(), "4°C");
                assert_eq!(ready.feels_like_label(), "0°C");
                assert_eq!(ready.range_label(), "1°C / 8°C");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }
}
