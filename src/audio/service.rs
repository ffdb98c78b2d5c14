// Interface to the host's audio playback service
use async_trait::async_trait;
use thiserror::Error;

/// Called once when a sound finishes on its own
pub type EndedCallback = Box<dyn FnOnce() + Send + 'static>;

/// What to play and how
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub src: String,
    /// 0.0 to 1.0
    pub volume: f32,
    /// A looped sound repeats and never reports its end
    pub looped: bool,
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio source not found: {0}")]
    NotFound(String),
    #[error("unsupported audio format: {0}")]
    Unsupported(String),
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Starts sounds on behalf of the preview
#[async_trait]
pub trait AudioService: Send + Sync {
    /// Resolves once the sound is loaded and playing
    async fn play(&self, request: PlayRequest) -> Result<Box<dyn SoundHandle>, PlaybackError>;
}

/// A sound started by [`AudioService::play`]
///
/// Dropping the handle releases it on the service side.
pub trait SoundHandle: Send {
    /// Halt playback
    fn stop(&mut self);

    /// Register the natural-end notification. It must not fire after
    /// `stop` has been called, and fires at most once.
    fn on_ended(&mut self, callback: EndedCallback);
}
