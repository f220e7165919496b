pub mod controller;
pub mod input;
pub mod lifecycle;
mod overlay;
pub mod registry;
pub mod session;
pub mod state;
pub mod traits;
pub mod types;

pub use controller::{SessionCommand, SessionHandle, SessionSnapshot};
pub use input::InputAction;
pub use lifecycle::LifecyclePhase;
pub use registry::SessionRegistry;
pub use session::{PlaybackSession, SessionDeps};
pub use state::SessionState;
pub use traits::{HostWindow, MediaResolver, MediaSurface};
pub use types::{PlaybackRate, PlaybackStatus, Quality, SessionId};
