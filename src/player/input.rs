use crate::events::{Key, KeyPress};

/// Session operation a handled shortcut maps to. Seek and volume amounts come
/// from the playback config, so the actions themselves carry no magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    TogglePlay,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    /// Escape: leave fullscreen when active, otherwise close the session.
    ExitFullscreenOrClose,
}

/// Translate a key press into a session action. Returns `None` when the key
/// is not bound or when a text-entry element holds focus; a `Some` result
/// also means the host must suppress its default handling for the key.
pub fn map_key(press: &KeyPress) -> Option<InputAction> {
    if press.text_input_focused {
        return None;
    }

    match press.key {
        Key::Space | Key::K => Some(InputAction::TogglePlay),
        Key::ArrowLeft => Some(InputAction::SeekBackward),
        Key::ArrowRight => Some(InputAction::SeekForward),
        Key::ArrowUp => Some(InputAction::VolumeUp),
        Key::ArrowDown => Some(InputAction::VolumeDown),
        Key::M => Some(InputAction::ToggleMute),
        Key::F => Some(InputAction::ToggleFullscreen),
        Key::Escape => Some(InputAction::ExitFullscreenOrClose),
        Key::Other(_) => None,
    }
}
