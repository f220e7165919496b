// Playback session controller for the Marquee streaming client.
//
// The host application resolves catalog items, renders the observable state
// and forwards environment events; this crate owns everything between
// opening a player and tearing it down.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod player;
pub mod utils;

pub use config::{Config, PlaybackConfig};
pub use error::PlayerError;
pub use events::{InputBus, InputEvent, Key, KeyPress};
pub use models::MediaDescriptor;
pub use player::{
    HostWindow, LifecyclePhase, MediaResolver, MediaSurface, PlaybackRate, PlaybackSession,
    PlaybackStatus, Quality, SessionDeps, SessionHandle, SessionRegistry, SessionSnapshot,
};
