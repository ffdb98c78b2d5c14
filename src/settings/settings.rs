// Settings management and persistence
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const VOLUME_MIN: f32 = 0.0;
pub const VOLUME_MAX: f32 = 1.0;
pub const VOLUME_STEP: f32 = 0.05;
pub const DEFAULT_VOLUME: f32 = 0.5;

const SETTINGS_FILE_NAME: &str = "audio-preview.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User settings read every time a preview starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewSettings {
    /// Playback loudness, 0.0 to 1.0
    pub volume: f32,
    /// Repeat the preview instead of ending it
    pub loop_mode: bool,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            loop_mode: false,
        }
    }
}

impl PreviewSettings {
    /// Set the volume, clamped to the range and snapped to the slider step
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = snap_volume(volume);
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.set_volume(volume);
        self
    }

    pub fn with_loop_mode(mut self, loop_mode: bool) -> Self {
        self.loop_mode = loop_mode;
        self
    }
}

fn snap_volume(volume: f32) -> f32 {
    if !volume.is_finite() {
        return DEFAULT_VOLUME;
    }
    let clamped = volume.clamp(VOLUME_MIN, VOLUME_MAX);
    let steps = ((clamped - VOLUME_MIN) / VOLUME_STEP).round();
    (VOLUME_MIN + steps * VOLUME_STEP).clamp(VOLUME_MIN, VOLUME_MAX)
}

/// Read-only view of the settings, consulted at play time
pub trait SettingsStore: Send + Sync {
    fn current(&self) -> PreviewSettings;
}

impl SettingsStore for RwLock<PreviewSettings> {
    fn current(&self) -> PreviewSettings {
        *self.read()
    }
}

/// Settings persisted as JSON in the host's data directory
pub struct SettingsFile {
    path: PathBuf,
    settings: RwLock<PreviewSettings>,
}

impl SettingsFile {
    /// Get the settings file path
    pub fn settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join(SETTINGS_FILE_NAME)
    }

    /// Load settings from file, or use defaults if the file doesn't exist
    pub fn load(app_dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::settings_path(app_dir);

        if !path.exists() {
            debug!(?path, "no settings file found, using defaults");
            return Ok(Self {
                path,
                settings: RwLock::new(PreviewSettings::default()),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;

        let mut settings: PreviewSettings = serde_json::from_str(&content)?;
        settings.set_volume(settings.volume);

        info!(?path, "loaded preview settings");
        Ok(Self {
            path,
            settings: RwLock::new(settings),
        })
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&*self.settings.read())?;

        fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = ?self.path, "saved preview settings");
        Ok(())
    }

    /// Change the settings and persist them
    pub fn update<F>(&self, change: F) -> Result<PreviewSettings, SettingsError>
    where
        F: FnOnce(&mut PreviewSettings),
    {
        let updated = {
            let mut settings = self.settings.write();
            change(&mut *settings);
            let volume = settings.volume;
            settings.set_volume(volume);
            *settings
        };
        self.save()?;
        Ok(updated)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for SettingsFile {
    fn current(&self) -> PreviewSettings {
        *self.settings.read()
    }
}
