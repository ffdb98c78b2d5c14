// Host integration
// Turns file picker events into calls on the preview session
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::preview::{PlayButton, PreviewSession};

/// Events the host's file picker and audio service deliver
pub enum HostEvent {
    /// A file was picked, carrying its path
    FilePicked(String),
    /// The picker was drawn and created the preview button
    PickerRendered(Box<dyn PlayButton>),
    ButtonClicked,
    /// The audio service reports the preview ended on its own
    PlaybackEnded,
}

impl std::fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostEvent::FilePicked(path) => f.debug_tuple("FilePicked").field(path).finish(),
            HostEvent::PickerRendered(_) => f.write_str("PickerRendered"),
            HostEvent::ButtonClicked => f.write_str("ButtonClicked"),
            HostEvent::PlaybackEnded => f.write_str("PlaybackEnded"),
        }
    }
}

/// Serves host events for one preview session
pub struct PreviewHost {
    session: PreviewSession,
    events: mpsc::UnboundedReceiver<HostEvent>,
    clicks: Vec<JoinHandle<()>>,
}

impl PreviewHost {
    pub fn new(session: PreviewSession, events: mpsc::UnboundedReceiver<HostEvent>) -> Self {
        Self {
            session,
            events,
            clicks: Vec::new(),
        }
    }

    /// Create a host together with the sender the picker posts events to
    pub fn channel(session: PreviewSession) -> (Self, mpsc::UnboundedSender<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(session, rx), tx)
    }

    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    /// Handle one event. The wait for a loading sound runs as its own task
    /// so the picker keeps being served meanwhile.
    pub fn dispatch(&mut self, event: HostEvent) {
        debug!(?event, "host event");
        match event {
            HostEvent::FilePicked(path) => self.session.on_track_selected(path),
            HostEvent::PickerRendered(button) => self.session.attach_button(button),
            HostEvent::ButtonClicked => {
                // A disabled button never dispatches its click
                let enabled = self.session.button_view().is_some_and(|view| !view.disabled);
                if !enabled {
                    debug!("click on disabled preview button dropped");
                    return;
                }
                // Loading is applied here, before the next event is read
                let Some(pending) = self.session.begin_click() else {
                    return;
                };
                let session = self.session.clone();
                self.clicks.retain(|task| !task.is_finished());
                self.clicks.push(tokio::spawn(async move {
                    session.finish_loading(pending).await;
                }));
            }
            HostEvent::PlaybackEnded => self.session.on_playback_ended(),
        }
    }

    /// Serve events until every sender is gone, then wait for pending clicks
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("preview host started");

        while let Some(event) = self.events.recv().await {
            self.dispatch(event);
        }

        for task in self.clicks.drain(..) {
            task.await?;
        }

        info!("preview host stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PlayState;
    use crate::settings::PreviewSettings;
    use crate::testing::{MockAudio, RecordingButton};
    use parking_lot::RwLock;
    use std::sync::Arc;

    fn host_with(audio: Arc<MockAudio>) -> (PreviewHost, mpsc::UnboundedSender<HostEvent>) {
        let session = PreviewSession::new(audio, Arc::new(RwLock::new(PreviewSettings::default())));
        PreviewHost::channel(session)
    }

    #[tokio::test]
    async fn test_pick_render_and_play() {
        let audio = MockAudio::ready();
        let (host, events) = host_with(audio.clone());
        let session = host.session().clone();
        let button = RecordingButton::default();

        events.send(HostEvent::PickerRendered(Box::new(button.clone()))).unwrap();
        events.send(HostEvent::FilePicked("music/theme.ogg".to_string())).unwrap();
        events.send(HostEvent::ButtonClicked).unwrap();
        drop(events);

        host.run().await.unwrap();

        assert_eq!(session.state(), PlayState::Playing);
        assert_eq!(audio.requests()[0].src, "music/theme.ogg");

        audio.sound(0).finish();
        assert_eq!(session.state(), PlayState::Waiting);
    }

    #[tokio::test]
    async fn test_click_on_disabled_button_is_dropped() {
        let audio = MockAudio::ready();
        let (host, events) = host_with(audio.clone());
        let session = host.session().clone();

        events.send(HostEvent::PickerRendered(Box::new(RecordingButton::default()))).unwrap();
        events.send(HostEvent::FilePicked("notes.txt".to_string())).unwrap();
        events.send(HostEvent::ButtonClicked).unwrap();
        drop(events);

        host.run().await.unwrap();

        assert_eq!(session.state(), PlayState::Waiting);
        assert!(audio.requests().is_empty());
    }

    #[tokio::test]
    async fn test_second_queued_click_hits_disabled_button() {
        let audio = MockAudio::ready();
        let (host, events) = host_with(audio.clone());
        let session = host.session().clone();

        events.send(HostEvent::PickerRendered(Box::new(RecordingButton::default()))).unwrap();
        events.send(HostEvent::FilePicked("song.mp3".to_string())).unwrap();
        events.send(HostEvent::ButtonClicked).unwrap();
        events.send(HostEvent::ButtonClicked).unwrap();
        drop(events);

        host.run().await.unwrap();

        assert_eq!(session.state(), PlayState::Playing);
        assert_eq!(audio.requests().len(), 1);
        assert_eq!(audio.sound(0).stop_count(), 0);
    }

    #[tokio::test]
    async fn test_ended_event_and_stop_click() {
        let audio = MockAudio::ready();
        let (mut host, _events) = host_with(audio.clone());
        let session = host.session().clone();
        host.dispatch(HostEvent::PickerRendered(Box::new(RecordingButton::default())));
        host.dispatch(HostEvent::FilePicked("song.mp3".to_string()));

        session.on_play_button_clicked().await;
        host.dispatch(HostEvent::PlaybackEnded);
        assert_eq!(session.state(), PlayState::Waiting);
        assert_eq!(audio.sound(0).stop_count(), 0);

        session.on_play_button_clicked().await;
        host.dispatch(HostEvent::ButtonClicked);
        for task in host.clicks.drain(..) {
            task.await.unwrap();
        }
        assert_eq!(session.state(), PlayState::Waiting);
        assert_eq!(audio.sound(1).stop_count(), 1);
    }
}
