// Audio playback module
// Playback itself belongs to the host; the preview only talks to this interface

pub mod service;

pub use service::{AudioService, EndedCallback, PlayRequest, PlaybackError, SoundHandle};
