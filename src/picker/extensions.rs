// Playability check for picked files
// A file is previewable when its extension is one of the host's audio formats

/// Audio formats the host knows how to play
pub const AUDIO_FILE_EXTENSIONS: &[&str] = &[
    "aac", "flac", "m4a", "mid", "mp3", "ogg", "opus", "wav", "webm",
];

/// Lowercase substring after the last `.` of `path`
///
/// Returns `None` when the path has no `.` or ends with one.
pub fn file_extension(path: &str) -> Option<String> {
    let (_, ext) = path.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Check whether `path` ends in one of `extensions`
pub fn is_audio_path<S: AsRef<str>>(path: &str, extensions: &[S]) -> bool {
    match file_extension(path) {
        Some(ext) => extensions.iter().any(|e| e.as_ref() == ext),
        None => false,
    }
}

/// Remembers the last picked file and answers whether it can be previewed
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    selected_track: Option<String>,
    extensions: Vec<String>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::with_extensions(AUDIO_FILE_EXTENSIONS.iter().copied())
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a host-specific extension set instead of the default one.
    /// Entries may be given as `"MP3"` or `".mp3"`.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            selected_track: None,
            extensions,
        }
    }

    pub fn select(&mut self, path: impl Into<String>) {
        self.selected_track = Some(path.into());
    }

    pub fn selected_track(&self) -> Option<&str> {
        self.selected_track.as_deref()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn can_playback(&self) -> bool {
        self.selected_track
            .as_deref()
            .map(|track| is_audio_path(track, &self.extensions))
            .unwrap_or(false)
    }
}
