//! # Session
//!
//! Everything that touches the history runs on one thread. A [`Session`] owns the history,
//! the monitor and the hotkey listener, and advances them in a fixed order on every step:
//! pending hotkey presses first (they were marshaled here from the hook thread), then one
//! clipboard sample.
//!
//! [`Session::run`] repeats that step every poll interval until the stop flag is raised.

use crate::clipboard::ClipboardSource;
use crate::history::History;
use crate::hotkey::{HotkeyEvent, HotkeyListener, HotkeySource};
use crate::monitor::{ChangeEvent, Monitor, DEFAULT_POLL_INTERVAL};
use crate::store::HistoryBackend;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Changed(ChangeEvent),
    TogglePanel,
}

pub struct Session<B, C, H>
where
    B: HistoryBackend,
    C: ClipboardSource,
    H: HotkeySource,
{
    history: History<B>,
    monitor: Monitor<C>,
    hotkeys: HotkeyListener<H>,
    poll_interval: Duration,
}

impl<B, C, H> Session<B, C, H>
where
    B: HistoryBackend,
    C: ClipboardSource,
    H: HotkeySource,
{
    pub fn new(history: History<B>, monitor: Monitor<C>, hotkeys: HotkeyListener<H>) -> Self {
        Self {
            history,
            monitor,
            hotkeys,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn history(&self) -> &History<B> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History<B> {
        &mut self.history
    }

    pub fn monitor_mut(&mut self) -> &mut Monitor<C> {
        &mut self.monitor
    }

    pub fn hotkeys_mut(&mut self) -> &mut HotkeyListener<H> {
        &mut self.hotkeys
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Drains pending hotkey presses, then samples the clipboard once.
    pub fn step(&mut self) -> Vec<SessionEvent> {
        let mut events: Vec<SessionEvent> = self
            .hotkeys
            .drain()
            .into_iter()
            .map(|HotkeyEvent::Toggle| SessionEvent::TogglePanel)
            .collect();

        if let Some(change) = self.monitor.tick(&mut self.history) {
            events.push(SessionEvent::Changed(change));
        }
        events
    }

    /// Steps until `stop` is raised, sleeping one poll interval between steps.
    pub fn run<F>(&mut self, stop: &AtomicBool, mut on_event: F)
    where
        F: FnMut(SessionEvent),
    {
        info!(
            "Session started, polling every {}ms",
            self.poll_interval.as_millis()
        );
        while !stop.load(Ordering::SeqCst) {
            for event in self.step() {
                debug!("Session event: {:?}", event);
                on_event(event);
            }
            thread::sleep(self.poll_interval);
        }
        info!("Session stopped");
    }
}
