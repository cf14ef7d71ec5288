mod app;
mod audio;
mod config;
mod error;
mod events;
mod logger;
mod openai;
mod state;
mod storage;
mod ui;
mod weather;

use anyhow::Result;
use app::App;
use clap::{App as Cli, Arg};
use config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data")
                .short("d")
                .long("data")
                .value_name("DIR")
                .help("Directory holding the persisted to-do list")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Show debug messages in the log panel"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(dir) = matches.value_of("data") {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if matches.is_present("verbose") {
        config.log_level = "debug".to_string();
    }

    App::start(config).await
}
