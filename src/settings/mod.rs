// Preview settings: volume and loop mode

#[allow(clippy::module_inception)]
pub mod settings;

pub use settings::{
    PreviewSettings, SettingsError, SettingsFile, SettingsStore, DEFAULT_VOLUME, VOLUME_MAX,
    VOLUME_MIN, VOLUME_STEP,
};
