use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lift_store::SyncState;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Shows a "synchronizing" spinner whenever the store reports a remote
/// round-trip. Stops when dropped, clearing a spinner that is still drawn.
pub struct SyncIndicator {
    task: JoinHandle<()>,
    active: Arc<Mutex<Option<Progress>>>,
}

impl SyncIndicator {
    #[must_use]
    pub fn watch(mut rx: watch::Receiver<SyncState>) -> Self {
        let active: Arc<Mutex<Option<Progress>>> = Arc::default();
        let slot = Arc::clone(&active);
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let state = *rx.borrow_and_update();
                let mut spinner = lock(&slot);
                match state {
                    SyncState::Syncing if spinner.is_none() => {
                        *spinner = Some(Progress::spinner("synchronizing…"));
                    }
                    SyncState::Idle => {
                        if let Some(spinner) = spinner.take() {
                            spinner.finish_clear();
                        }
                    }
                    SyncState::Syncing => {}
                }
            }
            if let Some(spinner) = lock(&slot).take() {
                spinner.finish_clear();
            }
        });
        Self { task, active }
    }
}

impl Drop for SyncIndicator {
    fn drop(&mut self) {
        self.task.abort();
        if let Some(spinner) = lock(&self.active).take() {
            spinner.finish_clear();
        }
    }
}

fn lock(slot: &Mutex<Option<Progress>>) -> MutexGuard<'_, Option<Progress>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
