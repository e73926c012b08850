//! Timed, cancellable replay of a narration trace

use crate::suggest::narrator::NarrationEvent;
use crossbeam::channel::{after, bounded, select, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What a playback sink receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// Show this step
    Event(NarrationEvent),
    /// Every step was shown
    Finished,
    /// Playback was stopped; drop any highlighted state
    Cleared,
}

type SharedSink = Arc<Mutex<dyn FnMut(PlaybackSignal) + Send>>;

fn emit(sink: &SharedSink, signal: PlaybackSignal) {
    // A sink that panicked earlier still has to see `Cleared`
    let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
    (&mut *sink)(signal);
}

/// A running playback. Dropping the handle cancels it.
pub struct PlaybackHandle {
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    sink: SharedSink,
}

impl PlaybackHandle {
    /// Stop playback. The sink gets exactly one `Cleared` and nothing after it.
    pub fn cancel(mut self) {
        self.stop();
    }

    /// Block until every event was played, without clearing
    pub fn wait(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        self.cancel = None;
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, |w| w.is_finished())
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        if let Some(cancel) = self.cancel.take() {
            // The worker may have already finished and dropped its receiver
            let _ = cancel.send(());
        }
        let _ = worker.join();
        emit(&self.sink, PlaybackSignal::Cleared);
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Plays one narration at a time; starting a new one cancels the previous
#[derive(Default)]
pub struct Player {
    current: Option<PlaybackHandle>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `events`, one every `step`
    pub fn play<F>(&mut self, events: Vec<NarrationEvent>, step: Duration, sink: F)
    where
        F: FnMut(PlaybackSignal) + Send + 'static,
    {
        self.stop();
        self.current = Some(spawn(events, step, sink));
    }

    /// Cancel the current playback, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    /// Block until the current playback completes on its own
    pub fn wait(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.wait();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().map_or(false, |h| !h.is_finished())
    }
}

/// Start a standalone playback thread
pub fn spawn<F>(events: Vec<NarrationEvent>, step: Duration, sink: F) -> PlaybackHandle
where
    F: FnMut(PlaybackSignal) + Send + 'static,
{
    let sink: SharedSink = Arc::new(Mutex::new(sink));
    let (cancel_tx, cancel_rx) = bounded::<()>(1);
    let worker_sink = Arc::clone(&sink);

    let worker = thread::spawn(move || {
        let total = events.len();
        for (played, event) in events.into_iter().enumerate() {
            select! {
                recv(cancel_rx) -> _ => {
                    log::debug!("Playback cancelled after {} of {} events", played, total);
                    return;
                }
                recv(after(step)) -> _ => emit(&worker_sink, PlaybackSignal::Event(event)),
            }
        }
        emit(&worker_sink, PlaybackSignal::Finished);
    });

    PlaybackHandle {
        cancel: Some(cancel_tx),
        worker: Some(worker),
        sink,
    }
}
