/// Environment events delivered through the input bus.
///
/// These correspond to the window-global listeners a playback session binds
/// while it is open: keyboard input and fullscreen-state notifications.
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(KeyPress),
    FullscreenChanged(bool),
}

/// Keys the player shortcuts care about. Anything else arrives as `Other`
/// and is left for the host's default handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Space,
    K,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    M,
    F,
    Escape,
    Other(String),
}

impl Key {
    /// Parse a key name the way the shortcut table matches it:
    /// case-insensitive, with `" "` and `"space"` both meaning the space bar.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            " " | "space" => Key::Space,
            "k" => Key::K,
            "arrowleft" => Key::ArrowLeft,
            "arrowright" => Key::ArrowRight,
            "arrowup" => Key::ArrowUp,
            "arrowdown" => Key::ArrowDown,
            "m" => Key::M,
            "f" => Key::F,
            "escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// One keyboard event as observed by the host, together with the focus
/// context needed for the text-entry guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// True when a text-entry element holds input focus; shortcuts must not
    /// fire while the user is typing.
    pub text_input_focused: bool,
}

impl KeyPress {
    pub fn of(key: Key) -> Self {
        Self {
            key,
            text_input_focused: false,
        }
    }

    pub fn while_typing(key: Key) -> Self {
        Self {
            key,
            text_input_focused: true,
        }
    }
}
