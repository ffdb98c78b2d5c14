// File picker side of the preview
// Tracks the picked file and lists directory entries by playability

pub mod extensions;
pub mod scanner;

pub use extensions::{file_extension, is_audio_path, SelectionTracker, AUDIO_FILE_EXTENSIONS};
pub use scanner::{DirectoryScanner, PickerEntry};
