// Test doubles for the host collaborators
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::audio::{AudioService, EndedCallback, PlayRequest, PlaybackError, SoundHandle};
use crate::preview::{ButtonView, PlayButton};

/// Button that remembers every view it was given
#[derive(Clone, Default)]
pub(crate) struct RecordingButton {
    views: Arc<Mutex<Vec<ButtonView>>>,
}

impl RecordingButton {
    pub(crate) fn views(&self) -> Vec<ButtonView> {
        self.views.lock().clone()
    }

    pub(crate) fn last(&self) -> Option<ButtonView> {
        self.views.lock().last().copied()
    }
}

impl PlayButton for RecordingButton {
    fn render(&mut self, view: ButtonView) {
        self.views.lock().push(view);
    }
}

/// Observes one sound handed out by [`MockAudio`]
#[derive(Default)]
pub(crate) struct SoundProbe {
    stops: AtomicUsize,
    ended: Mutex<Option<EndedCallback>>,
}

impl SoundProbe {
    pub(crate) fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Simulate the sound reaching its end
    pub(crate) fn finish(&self) {
        let callback = self.ended.lock().take();
        if let Some(callback) = callback {
            callback();
        }
    }
}

struct MockSound {
    probe: Arc<SoundProbe>,
    ends_at_once: bool,
}

impl SoundHandle for MockSound {
    fn stop(&mut self) {
        self.probe.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn on_ended(&mut self, callback: EndedCallback) {
        if self.ends_at_once {
            callback();
        } else {
            *self.probe.ended.lock() = Some(callback);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ready,
    EndsAtOnce,
    Fail,
}

pub(crate) struct MockAudio {
    outcome: Outcome,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    requests: Mutex<Vec<PlayRequest>>,
    sounds: Mutex<Vec<Arc<SoundProbe>>>,
}

impl MockAudio {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            gate: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            sounds: Mutex::new(Vec::new()),
        }
    }

    /// Every play call resolves right away
    pub(crate) fn ready() -> Arc<Self> {
        Arc::new(Self::with_outcome(Outcome::Ready))
    }

    /// Sounds report their end as soon as the callback is registered
    pub(crate) fn ends_at_once() -> Arc<Self> {
        Arc::new(Self::with_outcome(Outcome::EndsAtOnce))
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self::with_outcome(Outcome::Fail))
    }

    /// The first play call waits until the returned sender fires
    pub(crate) fn gated() -> (Arc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let audio = Self::with_outcome(Outcome::Ready);
        *audio.gate.lock() = Some(rx);
        (Arc::new(audio), tx)
    }

    pub(crate) fn requests(&self) -> Vec<PlayRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn sound(&self, index: usize) -> Arc<SoundProbe> {
        Arc::clone(&self.sounds.lock()[index])
    }
}

#[async_trait]
impl AudioService for MockAudio {
    async fn play(&self, request: PlayRequest) -> Result<Box<dyn SoundHandle>, PlaybackError> {
        self.requests.lock().push(request.clone());

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.outcome == Outcome::Fail {
            return Err(PlaybackError::NotFound(request.src));
        }

        let probe = Arc::new(SoundProbe::default());
        self.sounds.lock().push(Arc::clone(&probe));
        Ok(Box::new(MockSound {
            probe,
            ends_at_once: self.outcome == Outcome::EndsAtOnce,
        }))
    }
}
