//! Cancellable periodic tasks.
//!
//! A `ScheduledTask` runs its job once right away and then once per period
//! until it is cancelled. Dropping the handle cancels it too, so a widget's
//! timer never outlives the widget that started it.

use log::*;
use std::{future::Future, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// Handle to a running periodic job.
///
pub struct ScheduledTask {
    name: &'static str,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `job` on the current runtime, running it immediately and then
    /// every `period`. A job that overruns delays the next run instead of
    /// bursting to catch up.
    ///
    pub fn every<F, Fut>(name: &'static str, period: Duration, mut job: F) -> ScheduledTask
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!("Starting scheduled task '{}' every {:?}", name, period);
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => job().await,
                }
            }
            debug!("Scheduled task '{}' stopped", name);
        });
        ScheduledTask {
            name,
            token,
            handle: Some(handle),
        }
    }

    /// Request cancellation without waiting for the task to finish.
    ///
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait until the task has exited. A job already running is
    /// allowed to finish first.
    ///
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Scheduled task '{}' ended abnormally: {}", self.name, e);
            }
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
