// Audio Preview - play/stop button for audio files picked in a file browser
// Module declarations
pub mod audio;
pub mod host;
pub mod picker;
pub mod preview;
pub mod settings;

#[cfg(test)]
mod testing;

pub use audio::{AudioService, EndedCallback, PlayRequest, PlaybackError, SoundHandle};
pub use host::{HostEvent, PreviewHost};
pub use picker::{DirectoryScanner, PickerEntry, SelectionTracker, AUDIO_FILE_EXTENSIONS};
pub use preview::{ButtonIcon, ButtonView, InvalidPlayState, PendingPlay, PlayButton, PlayState, PreviewSession};
pub use settings::{PreviewSettings, SettingsError, SettingsFile, SettingsStore};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for the host process.
/// `RUST_LOG` overrides the default `audio_preview=info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("audio_preview=info"));

    // Another subscriber may already be installed by the host
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
