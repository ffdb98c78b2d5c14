use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::state::{ButtonView, PlayButton, PlayState};
use crate::audio::{AudioService, PlayRequest, SoundHandle};
use crate::picker::{DirectoryScanner, PickerEntry, SelectionTracker};
use crate::settings::SettingsStore;

struct Inner {
    state: PlayState,
    selection: SelectionTracker,
    sound: Option<Box<dyn SoundHandle>>,
    button: Option<Box<dyn PlayButton>>,
    view: Option<ButtonView>,
    // Bumped on every play action so late callbacks can tell they are stale
    generation: u64,
}

impl Inner {
    /// Render `state` on the button and store it. Fails without touching
    /// anything if the state has no look.
    fn apply(&mut self, state: PlayState) -> bool {
        let Some(view) = state.view(self.selection.can_playback()) else {
            warn!(?state, current = ?self.state, "refusing to apply play state");
            return false;
        };

        if let Some(button) = self.button.as_mut() {
            button.render(view);
        }
        self.view = Some(view);

        if self.state != state {
            debug!(from = ?self.state, to = ?state, "preview state changed");
        }
        self.state = state;
        true
    }

    fn refresh(&mut self) -> bool {
        let state = self.state;
        self.apply(state)
    }

    /// Natural end of the sound started by play action `generation`.
    /// Returns the released handle so it is dropped outside the lock.
    fn finish(&mut self, generation: u64) -> Option<Box<dyn SoundHandle>> {
        if self.generation != generation {
            debug!(generation, current = self.generation, "ignoring end of an older preview");
            return None;
        }

        match self.state {
            PlayState::Playing => {
                info!("preview finished");
                let sound = self.sound.take();
                self.apply(PlayState::Waiting);
                sound
            }
            PlayState::Loading => {
                debug!("preview ended before it was ready");
                self.apply(PlayState::Waiting);
                None
            }
            _ => None,
        }
    }
}

/// A play request issued by a click, waiting to be sent to the audio service
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPlay {
    pub request: PlayRequest,
    generation: u64,
}

/// The preview button's state machine and the selection it plays
///
/// Cloning gives another handle to the same session, which is how host
/// callbacks and the sound's end notification reach it.
#[derive(Clone)]
pub struct PreviewSession {
    inner: Arc<Mutex<Inner>>,
    audio: Arc<dyn AudioService>,
    settings: Arc<dyn SettingsStore>,
}

impl PreviewSession {
    pub fn new(audio: Arc<dyn AudioService>, settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_selection(audio, settings, SelectionTracker::new())
    }

    /// Start with a custom selection tracker, e.g. a host-specific extension set
    pub fn with_selection(
        audio: Arc<dyn AudioService>,
        settings: Arc<dyn SettingsStore>,
        selection: SelectionTracker,
    ) -> Self {
        let mut inner = Inner {
            state: PlayState::Init,
            selection,
            sound: None,
            button: None,
            view: None,
            generation: 0,
        };
        inner.apply(PlayState::Waiting);

        Self {
            inner: Arc::new(Mutex::new(inner)),
            audio,
            settings,
        }
    }

    /// Hand over the button the host just created and draw it
    pub fn attach_button(&self, button: Box<dyn PlayButton>) {
        let mut inner = self.inner.lock();
        inner.button = Some(button);
        inner.refresh();
    }

    /// The picker selected `path`. Playback state is unchanged; only the
    /// button is redrawn.
    pub fn on_track_selected(&self, path: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.selection.select(path);
        debug!(track = ?inner.selection.selected_track(), can_playback = inner.selection.can_playback(), "track selected");
        inner.refresh();
    }

    pub fn selected_track(&self) -> Option<String> {
        self.inner.lock().selection.selected_track().map(str::to_owned)
    }

    pub fn can_playback(&self) -> bool {
        self.inner.lock().selection.can_playback()
    }

    pub fn state(&self) -> PlayState {
        self.inner.lock().state
    }

    /// Last view drawn on the button
    pub fn button_view(&self) -> Option<ButtonView> {
        self.inner.lock().view
    }

    pub fn is_sound_active(&self) -> bool {
        self.inner.lock().sound.is_some()
    }

    /// Apply `state`, redrawing the button even if it is the current one.
    /// Moving to Waiting stops and releases any sound still held.
    pub fn set_state(&self, state: PlayState) -> bool {
        let (applied, released) = {
            let mut inner = self.inner.lock();
            let applied = inner.apply(state);
            let released = if applied && state == PlayState::Waiting {
                inner.sound.take()
            } else {
                None
            };
            (applied, released)
        };

        if let Some(mut sound) = released {
            info!("stopping preview left behind by a state change");
            sound.stop();
        }
        applied
    }

    /// Apply a raw state value as the host stores it
    pub fn set_state_value(&self, value: u8) -> bool {
        match PlayState::try_from(value) {
            Ok(state) => self.set_state(state),
            Err(err) => {
                warn!(%err, "refusing to apply play state");
                false
            }
        }
    }

    /// Redraw the button for the current state
    pub fn refresh(&self) -> bool {
        self.inner.lock().refresh()
    }

    /// Button click: stop if playing, otherwise load and play the selection
    pub async fn on_play_button_clicked(&self) {
        if let Some(pending) = self.begin_click() {
            self.finish_loading(pending).await;
        }
    }

    /// Synchronous part of a click. Stops a playing sound, or switches to
    /// Loading and returns the play request still to be sent. The button is
    /// disabled by the time this returns, so a following click is dropped.
    pub fn begin_click(&self) -> Option<PendingPlay> {
        let mut inner = self.inner.lock();
        let state = inner.state;
        match state {
            PlayState::Playing => {
                let sound = inner.sound.take();
                inner.apply(PlayState::Waiting);
                drop(inner);

                match sound {
                    Some(mut sound) => {
                        info!("stopping preview");
                        sound.stop();
                    }
                    None => warn!("preview was playing without a sound to stop"),
                }
                None
            }
            PlayState::Loading => {
                debug!("click ignored while loading");
                None
            }
            _ => {
                if !inner.selection.can_playback() {
                    debug!(track = ?inner.selection.selected_track(), "click ignored, selection is not playable");
                    return None;
                }
                let src = inner.selection.selected_track().map(str::to_owned)?;

                inner.generation += 1;
                inner.apply(PlayState::Loading);

                let settings = self.settings.current();
                Some(PendingPlay {
                    request: PlayRequest {
                        src,
                        volume: settings.volume,
                        looped: settings.loop_mode,
                    },
                    generation: inner.generation,
                })
            }
        }
    }

    /// The host reports that the current sound ended on its own
    pub fn on_playback_ended(&self) {
        let released = {
            let mut inner = self.inner.lock();
            let generation = inner.generation;
            inner.finish(generation)
        };
        drop(released);
    }

    /// Asynchronous part of a click: ask the audio service to play and
    /// move to Playing once it answers, or back to Waiting if it fails
    pub async fn finish_loading(&self, pending: PendingPlay) {
        let PendingPlay { request, generation } = pending;
        info!(src = %request.src, volume = request.volume, looped = request.looped, "starting preview");

        match self.audio.play(request).await {
            Ok(mut sound) => {
                let ended = Arc::new(AtomicBool::new(false));
                let weak = Arc::downgrade(&self.inner);
                let ended_flag = Arc::clone(&ended);
                sound.on_ended(Box::new(move || {
                    ended_flag.store(true, Ordering::SeqCst);
                    if let Some(inner) = weak.upgrade() {
                        let released = inner.lock().finish(generation);
                        drop(released);
                    }
                }));

                let mut inner = self.inner.lock();
                if inner.generation != generation || inner.state != PlayState::Loading {
                    drop(inner);
                    if !ended.load(Ordering::SeqCst) {
                        debug!("preview abandoned while loading, stopping it");
                        sound.stop();
                    }
                    return;
                }

                let previous = inner.sound.replace(sound);
                inner.apply(PlayState::Playing);
                drop(inner);

                if let Some(mut previous) = previous {
                    warn!("replacing a sound that was still held, stopping it");
                    previous.stop();
                }
            }
            Err(err) => {
                error!(%err, "failed to start preview");
                let mut inner = self.inner.lock();
                if inner.generation == generation && inner.state == PlayState::Loading {
                    inner.apply(PlayState::Waiting);
                }
            }
        }
    }

    /// Entries of `directory` flagged with this session's extension set
    pub fn list_directory(&self, directory: &Path) -> anyhow::Result<Vec<PickerEntry>> {
        let extensions = self.inner.lock().selection.extensions().to_vec();
        DirectoryScanner::list(directory, extensions.as_slice())
    }
}
