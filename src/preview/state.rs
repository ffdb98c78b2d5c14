use thiserror::Error;

/// Preview button state
///
/// Numeric values match the ones the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PlayState {
    /// Before the session's first transition. Cannot be applied.
    #[default]
    Init = 0,
    Playing = 1,
    Waiting = 2,
    Loading = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid play state value: {0}")]
pub struct InvalidPlayState(pub u8);

impl TryFrom<u8> for PlayState {
    type Error = InvalidPlayState;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlayState::Init),
            1 => Ok(PlayState::Playing),
            2 => Ok(PlayState::Waiting),
            3 => Ok(PlayState::Loading),
            other => Err(InvalidPlayState(other)),
        }
    }
}

impl PlayState {
    /// How the button looks in this state, `None` if the state has no look
    pub fn view(self, can_playback: bool) -> Option<ButtonView> {
        match self {
            PlayState::Waiting => Some(ButtonView {
                icon: ButtonIcon::Play,
                disabled: !can_playback,
            }),
            PlayState::Playing => Some(ButtonView {
                icon: ButtonIcon::Stop,
                disabled: false,
            }),
            PlayState::Loading => Some(ButtonView {
                icon: ButtonIcon::Spinner,
                disabled: true,
            }),
            PlayState::Init => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonIcon {
    Play,
    Stop,
    Spinner,
}

impl ButtonIcon {
    /// Icon classes for the host's icon font
    pub fn css_classes(self) -> &'static [&'static str] {
        match self {
            ButtonIcon::Play => &["fa-play"],
            ButtonIcon::Stop => &["fa-stop"],
            ButtonIcon::Spinner => &["fa-spinner", "fa-spin"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub icon: ButtonIcon,
    pub disabled: bool,
}

/// The preview button placed in the picker by the host
pub trait PlayButton: Send {
    fn render(&mut self, view: ButtonView);
}
