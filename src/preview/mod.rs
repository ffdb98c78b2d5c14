// Preview button
// State machine driving the play/stop button and the sound it controls

pub mod session;
pub mod state;

pub use session::{PendingPlay, PreviewSession};
pub use state::{ButtonIcon, ButtonView, InvalidPlayState, PlayButton, PlayState};
