use crate::audio::CommandPlayer;
use crate::config::Config;
use crate::error::AppResult;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler, Services};
use crate::events::schedule::ScheduledTask;
use crate::events::terminal::{self, Handler as TerminalEventHandler};
use crate::logger;
use crate::openai::OpenAi;
use crate::state::State;
use crate::storage::FileStore;
use crate::weather::{OpenWeather, WeatherQuery};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let logs = logger::init(logger::parse_level(&config.log_level))?;

        info!("Starting dashboard...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let mut state = State::new(tx.clone(), logs);
        state.weather_mut().set_location(&config.location);
        state
            .todo_mut()
            .load(Box::new(FileStore::in_dir(&config.data_dir()?)));

        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx, app.services()?);

        let clock_task = app.activate_clock();
        let weather_task = app.activate_weather(tx);
        let result = app.start_ui().await;

        clock_task.stop().await;
        weather_task.stop().await;
        info!("Exiting dashboard...");
        result
    }

    /// Build the remote service handles from configuration.
    ///
    fn services(&self) -> AppResult<Services> {
        let query = WeatherQuery {
            location: self.config.location.clone(),
            units: self.config.units.clone(),
            language: self.config.language.clone(),
        };
        if self.config.weather_api_key().is_none() {
            warn!("No weather API key configured; weather will not load");
        }
        Ok(Services {
            weather: Box::new(OpenWeather::new(
                self.config.weather_api_key(),
                &self.config.weather_base_url,
                query,
            )?),
            translation: Box::new(OpenAi::new(
                self.config.openai_api_key(),
                &self.config.openai_base_url,
            )?),
            speech: Box::new(OpenAi::new(
                self.config.openai_api_key(),
                &self.config.openai_base_url,
            )?),
            player: Arc::new(CommandPlayer::new(
                self.config.player_command.clone(),
                &CommandPlayer::default_scratch_dir(),
            )),
        })
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver, services: Services) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to create network runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                let mut network_event_handler = NetworkEventHandler::new(&cloned_state, &services);
                while let Ok(network_event) = net_receiver.recv() {
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                }
            })
        });
    }

    /// Tick the clock now and once per second.
    ///
    fn activate_clock(&self) -> ScheduledTask {
        let state = Arc::clone(&self.state);
        ScheduledTask::every("clock", CLOCK_PERIOD, move || {
            let state = Arc::clone(&state);
            async move {
                state.lock().await.clock_mut().tick(Local::now());
            }
        })
    }

    /// Request a weather fetch now and on every refresh period.
    ///
    fn activate_weather(&self, net_sender: NetworkEventSender) -> ScheduledTask {
        ScheduledTask::every(
            "weather",
            self.config.weather_refresh_interval(),
            move || {
                let net_sender = net_sender.clone();
                async move {
                    if let Err(e) = net_sender.send(NetworkEvent::FetchWeather) {
                        error!("Failed to queue weather refresh: {}", e);
                    }
                }
            },
        )
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop. The terminal is restored even when the loop fails.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run_ui(&mut terminal).await;

        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn run_ui(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            {
                let state = self.state.lock().await;
                terminal.draw(|frame| crate::ui::render(frame, &state))?;
            }
            let event = tokio::task::block_in_place(|| terminal_event_handler.next())?;
            let mut state = self.state.lock().await;
            if !terminal::handle(event, &mut state) {
                debug!("Received application exit request.");
                return Ok(());
            }
        }
    }
}
