//! Audio playback for synthesized speech.
//!
//! The clip is written to a temporary file in the cache directory and handed
//! to an external player command; the file is removed once the player exits.

use async_trait::async_trait;
use log::*;
use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{fs, process::Command};

/// Errors that can occur while playing a clip.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No player program configured
    #[error("No audio player command configured")]
    NoCommand,

    /// Failed to write the clip or to launch the player
    #[error("Audio I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The player exited unsuccessfully
    #[error("Audio player '{program}' exited with {status}")]
    PlayerFailed { program: String, status: String },
}

/// Anything able to play an MP3 clip to completion.
///
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> Result<(), AudioError>;
}

/// Plays clips through an external program such as `mpv`.
///
pub struct CommandPlayer {
    command: Vec<String>,
    scratch_dir: PathBuf,
}

impl CommandPlayer {
    pub fn new(command: Vec<String>, scratch_dir: &Path) -> CommandPlayer {
        CommandPlayer {
            command,
            scratch_dir: scratch_dir.to_path_buf(),
        }
    }

    /// Return the scratch directory under the user cache, falling back to the
    /// system temporary directory.
    ///
    pub fn default_scratch_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("dashboard-tui")
    }

    async fn run(&self, clip: &Path) -> Result<(), AudioError> {
        let (program, args) = self.command.split_first().ok_or(AudioError::NoCommand)?;
        debug!("Starting audio player '{}'...", program);
        let status = Command::new(program)
            .args(args)
            .arg(clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        if !status.success() {
            return Err(AudioError::PlayerFailed {
                program: program.to_owned(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, audio: Vec<u8>) -> Result<(), AudioError> {
        fs::create_dir_all(&self.scratch_dir).await?;
        let clip = self
            .scratch_dir
            .join(format!("speech-{}.mp3", uuid::Uuid::new_v4()));
        fs::write(&clip, &audio).await?;

        let result = self.run(&clip).await;
        if let Err(e) = fs::remove_file(&clip).await {
            warn!("Failed to remove speech clip {}: {}", clip.display(), e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> PathBuf {
        std::env::temp_dir().join(format!("dashboard-tui-audio-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn play_without_command_fails() {
        let dir = scratch();
        let player = CommandPlayer::new(vec![], &dir);
        let result = player.play(vec![1, 2, 3]).await;
        assert!(matches!(result, Err(AudioError::NoCommand)));
        let leftovers = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(leftovers, 0);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn play_missing_program_fails() {
        let dir = scratch();
        let player = CommandPlayer::new(vec!["dashboard-tui-no-such-player".to_string()], &dir);
        let result = player.play(vec![1, 2, 3]).await;
        assert!(matches!(result, Err(AudioError::Io(_))));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn play_runs_command_and_cleans_up() {
        let dir = scratch();
        let player = CommandPlayer::new(vec!["true".to_string()], &dir);
        player.play(vec![1, 2, 3]).await.unwrap();
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn play_reports_player_failure() {
        let dir = scratch();
        let player = CommandPlayer::new(vec!["false".to_string()], &dir);
        let result = player.play(vec![1]).await;
        assert!(matches!(result, Err(AudioError::PlayerFailed { .. })));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
